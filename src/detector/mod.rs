//! Plaque detection service.
//!
//! Modules
//! - [`options`] – construction-time options for preprocessing, the contour
//!   detector and suppression.
//! - `pipeline` – the [`PlaqueDetector`] implementation.
//! - [`feedback`] – feedback samples and the model version counter.

pub mod feedback;
pub mod options;
mod pipeline;

pub use feedback::{FeedbackSample, MIN_TRAINING_SAMPLES};
pub use options::DetectorOptions;
pub use pipeline::PlaqueDetector;
