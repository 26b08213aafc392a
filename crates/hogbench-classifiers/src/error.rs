use std::path::PathBuf;

/// Errors raised while loading images, fitting models or scoring predictions.
///
/// Every variant is fatal for a benchmark run; nothing in the crate retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path '{}' does not exist.", .0.display())]
    MissingDataset(PathBuf),
    #[error("No images found. Please check the dataset path or ensure the directory contains images.")]
    EmptyDataset,
    #[error("Failed to decode image {}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid train/test split: {0}")]
    InvalidSplit(String),
    #[error("Label '{0}' was not seen when the encoder was fit")]
    UnknownLabel(String),
    #[error("Class code {0} is not known to the encoder")]
    UnknownClassCode(usize),
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("Cannot compute {0} on empty input")]
    EmptyInput(&'static str),
    #[error("Model '{0}' must be fit before predicting")]
    NotFitted(String),
    #[error("Model '{model}' failed: {message}")]
    Model { model: String, message: String },
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a library error coming out of a model's fit or predict step.
    pub fn model(model: &str, err: impl std::fmt::Display) -> Self {
        Error::Model {
            model: model.to_string(),
            message: err.to_string(),
        }
    }
}
