//! Serializable run reports for the detection service and the tools.
//!
//! [`DetectionReport`] is returned by
//! [`PlaqueDetector::detect_with_report`](crate::PlaqueDetector::detect_with_report)
//! and written verbatim by the `plaque_detect` binary.

pub mod report;
pub mod timing;

pub use report::{DetectionReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
