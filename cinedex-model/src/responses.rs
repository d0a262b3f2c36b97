use serde::{Deserialize, Serialize};

/// Outcome tag carried by every envelope. The catalog only ever answers with
/// a success envelope; failures use the server's error body instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Succeed,
}

/// Uniform `{"status": "Succeed", "data": ...}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn succeed(data: T) -> Self {
        Self {
            status: ResponseStatus::Succeed,
            data,
        }
    }
}

/// Listing payload: `{"results": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsPayload<T> {
    pub results: Vec<T>,
}

impl<T> ResultsPayload<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Mutation payload: `{"modified_count": n}`. Zero signals a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedCount {
    pub modified_count: u64,
}

impl ModifiedCount {
    pub fn new(modified_count: u64) -> Self {
        Self { modified_count }
    }

    pub fn is_noop(&self) -> bool {
        self.modified_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MovieDocument;
    use serde_json::json;

    #[test]
    fn missing_lookup_serializes_as_null_data() {
        let response: ApiResponse<Option<MovieDocument>> =
            ApiResponse::succeed(None);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "Succeed", "data": null })
        );
    }

    #[test]
    fn modified_count_envelope_shape() {
        let response = ApiResponse::succeed(ModifiedCount::new(1));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "Succeed", "data": { "modified_count": 1 } })
        );
    }
}
