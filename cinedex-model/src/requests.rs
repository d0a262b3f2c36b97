use serde::{Deserialize, Serialize};

/// Body of `POST /addNewMovieReview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMovieReviewRequest {
    pub movie_item_id: i64,
    pub new_review_content: String,
}

/// Body of `PUT /updateMovieInfo`. Absent or empty fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMovieInfoRequest {
    pub movie_item_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "directedBy", default)]
    pub directed_by: Option<String>,
    #[serde(default)]
    pub starring: Option<String>,
}

/// Body of `POST /addTag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTagRequest {
    pub movie_item_id: i64,
    pub new_tag_name: String,
}

/// Body of `DELETE /deleteTag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTagRequest {
    pub movie_item_id: i64,
    pub tag_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_accepts_partial_bodies() {
        let req: UpdateMovieInfoRequest = serde_json::from_value(json!({
            "movie_item_id": 3,
            "directedBy": "Agnès Varda"
        }))
        .unwrap();

        assert_eq!(req.movie_item_id, 3);
        assert_eq!(req.title, None);
        assert_eq!(req.directed_by.as_deref(), Some("Agnès Varda"));
        assert_eq!(req.starring, None);
    }
}
