//! Label encoding shared by the loader, the bench and the reports.
//!
//! The encoder is fit once on the full label sequence, before the train/test
//! split, so both partitions share one coding and reports can map codes back to
//! class names.
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Bidirectional mapping between class names and contiguous `usize` codes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Assign codes `0..k` to the distinct labels in order of first appearance.
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut encoder = LabelEncoder::default();
        for label in labels {
            let label = label.as_ref();
            if !encoder.codes.contains_key(label) {
                encoder.codes.insert(label.to_string(), encoder.classes.len());
                encoder.classes.push(label.to_string());
            }
        }
        encoder
    }

    /// Fit on `labels` and return their codes in input order.
    pub fn fit_transform<S: AsRef<str>>(labels: &[S]) -> (Self, Vec<usize>) {
        let encoder = Self::fit(labels);
        let codes = labels
            .iter()
            .map(|label| encoder.codes[label.as_ref()])
            .collect();
        (encoder, codes)
    }

    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        labels.iter().map(|label| self.code(label.as_ref())).collect()
    }

    pub fn inverse_transform(&self, codes: &[usize]) -> Result<Vec<String>> {
        codes
            .iter()
            .map(|&code| self.class_name(code).map(str::to_string))
            .collect()
    }

    pub fn code(&self, label: &str) -> Result<usize> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }

    pub fn class_name(&self, code: usize) -> Result<&str> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(Error::UnknownClassCode(code))
    }

    /// Class names indexed by code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}
