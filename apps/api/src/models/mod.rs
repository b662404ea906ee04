pub mod image;
pub mod resume;
pub mod snapshot;
