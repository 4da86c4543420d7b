pub mod schema;
pub mod predictor;
pub mod preprocess;

pub use schema::*;
pub use predictor::*;
pub use preprocess::preprocess_image;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("cannot read image {path}: {reason}")]
    ImageAccess { path: PathBuf, reason: String },
    #[error("catalog has no classes")]
    EmptyCatalog,
}
