//! hogbench-classifiers: HOG features and classical classifiers for labeled
//! image folders.
//!
//! The crate loads a `root/<class>/<image>` dataset, turns every image into a
//! fixed-length Histogram of Oriented Gradients descriptor, encodes the class
//! names, and compares a fixed suite of `linfa` classifiers (linear SVM, KNN,
//! decision tree) on a seeded train/test split.
pub mod bench;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod features;
pub mod models;
pub mod preprocessing;
pub mod report;
pub mod stats;

pub use error::{Error, Result};
