pub mod listings;
pub mod movies;
pub mod reviews;
pub mod system;
pub mod tags;
