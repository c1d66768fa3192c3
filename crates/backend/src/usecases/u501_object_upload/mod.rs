pub mod executor;

pub use executor::{UploadError, UploadExecutor};
