//! Handcrafted image descriptors.
pub mod hog;

pub use hog::{extract_features, hog_descriptor};
