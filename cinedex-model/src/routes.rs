//! Route definitions shared by the server and its clients.

pub const ROOT: &str = "/";
pub const DOCS: &str = "/docs";
pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

pub mod reviews {
    pub const ADD: &str = "/addNewMovieReview";
    pub const SHOW: &str = "/showReviews/{movie_item_id}";
}

pub mod movies {
    pub const BASIC_INFO: &str = "/basicInfo/{movie_item_id}";
    pub const UPDATE_INFO: &str = "/updateMovieInfo";
    pub const BY_TITLE: &str = "/findMovieByTitle/{title}";
    pub const BY_DIRECTOR: &str = "/findMoviesByDirector/{director}";
}

pub mod listings {
    pub const TOP_RATED: &str = "/findTopRatedMoviesTitles/{page}/{page_size}";
    pub const IN_RATING_RANGE: &str =
        "/findMoviesInRatingRange/{lower_range}/{upper_range}/{page}/{page_size}";
    pub const BETTER_THAN_RATING: &str =
        "/findMoviesBetterThanRating/{rating}/{page}/{page_size}";
    pub const TITLE_CONTAINS: &str = "/findMovieContains/{keyword}/{page}/{page_size}";
    pub const WITH_TAG: &str = "/findMoviesWithTag/{tag}/{page}/{page_size}";
    pub const WITH_STAR: &str = "/findMoviesWithStar/{star}/{page}/{page_size}";
}

pub mod tags {
    pub const DISPLAY: &str = "/displayTags/{movie_item_id}";
    pub const ADD: &str = "/addTag";
    pub const DELETE: &str = "/deleteTag";
}

pub mod utils {
    /// Replace a single path parameter (e.g. `"{page}"`) with the provided value.
    pub fn replace_param(route: &str, param: &str, value: impl AsRef<str>) -> String {
        route.replace(param, value.as_ref())
    }

    /// Replace multiple path parameters in order.
    pub fn replace_params(
        route: &str,
        params: &[(impl AsRef<str>, impl AsRef<str>)],
    ) -> String {
        let mut path = route.to_string();
        for (param, value) in params {
            path = path.replace(param.as_ref(), value.as_ref());
        }
        path
    }
}
