//! User feedback and the model version counter.
//!
//! Detection is parameter-driven, so "retraining" only records that a batch
//! of corrected annotations was accepted by bumping the version. Persisting
//! the version between runs is the caller's job.
use crate::types::Detection;
use serde::{Deserialize, Serialize};

/// Fewest usable samples [`retrain`](super::PlaqueDetector::retrain) accepts.
pub const MIN_TRAINING_SAMPLES: usize = 5;

/// One corrected annotation for a previously analysed image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSample {
    pub image_id: String,
    pub actual_count: Option<u32>,
    pub plaques: Vec<Detection>,
}

impl FeedbackSample {
    /// A sample without an image reference cannot be used.
    pub fn is_usable(&self) -> bool {
        !self.image_id.trim().is_empty()
    }
}

pub(crate) fn count_usable(samples: &[FeedbackSample]) -> usize {
    samples.iter().filter(|s| s.is_usable()).count()
}
