//! Core data model definitions shared across Cinedex crates.
#![allow(missing_docs)]

pub mod movie;
pub mod requests;
pub mod responses;
pub mod routes;

pub use movie::{Document, MovieDocument, MovieField};
pub use requests::{
    AddMovieReviewRequest, AddTagRequest, DeleteTagRequest,
    UpdateMovieInfoRequest,
};
pub use responses::{ApiResponse, ModifiedCount, ResponseStatus, ResultsPayload};
