pub mod builder;
pub mod pagination;
pub mod pattern;
pub mod range;
pub mod types;

pub use builder::{FindQueryBuilder, Lookup};
pub use pagination::{MAX_PAGE_SIZE, MIN_PAGE_SIZE, Pagination};
pub use pattern::{MatchMode, MatchPattern, PatternNormalizer};
pub use range::{RATING_MAX, RATING_MIN, RatingRange, clamp, clamp_rating};
pub use types::*;
