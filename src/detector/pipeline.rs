//! Detection service running both candidate detectors and merging them.
//!
//! Typical usage:
//! ```no_run
//! use plaque_detector::{DetectionParams, PlaqueDetector};
//! use plaque_detector::image::io::load_image;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), plaque_detector::DetectionError> {
//! let decoded = load_image(Path::new("dish.png"))?;
//! let detector = PlaqueDetector::default();
//! let params = DetectionParams { sensitivity: 40, ..Default::default() };
//! let plaques = detector.detect(&decoded.as_buffer(), Some(&params))?;
//! println!("{} plaques", plaques.len());
//! # Ok(())
//! # }
//! ```
use super::feedback::{count_usable, FeedbackSample, MIN_TRAINING_SAMPLES};
use super::options::DetectorOptions;
use crate::diagnostics::{DetectionReport, InputDescriptor, TimingBreakdown};
use crate::error::DetectionError;
use crate::hough::detect_circles;
use crate::image::PixelBuffer;
use crate::preprocess::preprocess;
use crate::suppression::suppress;
use crate::threshold::detect_by_threshold_with;
use crate::types::{Detection, DetectionParams};
use log::debug;
use std::time::Instant;

/// Plaque detector: preprocess → (Hough ∥ threshold/contour) → suppression.
///
/// `detect` borrows `self` immutably, so one detector can serve concurrent
/// calls. Only [`retrain`](Self::retrain) mutates it.
#[derive(Clone, Debug, Default)]
pub struct PlaqueDetector {
    options: DetectorOptions,
    model_version: u32,
}

impl PlaqueDetector {
    /// Create a detector, rejecting option sets that would break a stage.
    pub fn new(options: DetectorOptions) -> Result<Self, DetectionError> {
        options.validate()?;
        Ok(Self {
            options,
            model_version: 0,
        })
    }

    /// Restore a version persisted by the caller.
    pub fn with_model_version(mut self, version: u32) -> Self {
        self.model_version = version;
        self
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    pub fn model_version(&self) -> u32 {
        self.model_version
    }

    /// Locate plaques in `image`. `None` uses [`DetectionParams::default`].
    ///
    /// An image without plaques yields `Ok` with an empty list.
    pub fn detect(
        &self,
        image: &PixelBuffer<'_>,
        params: Option<&DetectionParams>,
    ) -> Result<Vec<Detection>, DetectionError> {
        self.detect_with_report(image, params)
            .map(|report| report.detections)
    }

    /// Same as [`detect`](Self::detect) with per-stage timings and counts.
    pub fn detect_with_report(
        &self,
        image: &PixelBuffer<'_>,
        params: Option<&DetectionParams>,
    ) -> Result<DetectionReport, DetectionError> {
        let total_start = Instant::now();
        let params = params.copied().unwrap_or_default();
        params.validate()?;

        let pre_start = Instant::now();
        let gray = preprocess(image, &self.options.preprocess)?;
        let preprocess_ms = pre_start.elapsed().as_secs_f64() * 1000.0;

        let ((hough, hough_ms), (contour, contour_ms)) = rayon::join(
            || {
                let start = Instant::now();
                let found = detect_circles(&gray, &params);
                (found, start.elapsed().as_secs_f64() * 1000.0)
            },
            || {
                let start = Instant::now();
                let found = detect_by_threshold_with(&gray, &params, &self.options.threshold);
                (found, start.elapsed().as_secs_f64() * 1000.0)
            },
        );
        let contour = contour?;
        debug!(
            "PlaqueDetector::detect hough={} contour={}",
            hough.len(),
            contour.len()
        );

        let suppress_start = Instant::now();
        let hough_candidates = hough.len();
        let contour_candidates = contour.len();
        let mut candidates = hough;
        candidates.extend(contour);
        let detections = suppress(&candidates, &self.options.suppression);
        let suppress_ms = suppress_start.elapsed().as_secs_f64() * 1000.0;

        let mut timings =
            TimingBreakdown::with_total(total_start.elapsed().as_secs_f64() * 1000.0);
        timings.push("preprocess", preprocess_ms);
        timings.push("hough", hough_ms);
        timings.push("threshold_contour", contour_ms);
        timings.push("suppression", suppress_ms);
        debug!(
            "PlaqueDetector::detect kept={} latency_ms={:.3}",
            detections.len(),
            timings.total_ms
        );

        Ok(DetectionReport {
            input: InputDescriptor {
                width: gray.w,
                height: gray.h,
                channels: image.channels(),
            },
            params,
            hough_candidates,
            contour_candidates,
            detections,
            timings,
            model_version: self.model_version,
        })
    }

    /// Accept a batch of feedback and bump the model version.
    ///
    /// Needs at least [`MIN_TRAINING_SAMPLES`] usable samples; otherwise the
    /// version is left untouched.
    pub fn retrain(&mut self, samples: &[FeedbackSample]) -> Result<u32, DetectionError> {
        let available = count_usable(samples);
        if available < MIN_TRAINING_SAMPLES {
            return Err(DetectionError::InsufficientData {
                available,
                required: MIN_TRAINING_SAMPLES,
            });
        }
        self.model_version += 1;
        debug!(
            "PlaqueDetector::retrain version={} samples={}",
            self.model_version, available
        );
        Ok(self.model_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageU8;

    fn sample(id: &str) -> FeedbackSample {
        FeedbackSample {
            image_id: id.to_string(),
            actual_count: Some(3),
            plaques: Vec::new(),
        }
    }

    #[test]
    fn retrain_needs_five_usable_samples() {
        let mut det = PlaqueDetector::default();
        let mut samples: Vec<_> = (0..4).map(|i| sample(&format!("img{i}.png"))).collect();
        samples.push(sample("  "));
        assert_eq!(
            det.retrain(&samples),
            Err(DetectionError::InsufficientData {
                available: 4,
                required: MIN_TRAINING_SAMPLES
            })
        );
        assert_eq!(det.model_version(), 0);

        samples.push(sample("img9.png"));
        assert_eq!(det.retrain(&samples), Ok(1));
        assert_eq!(det.retrain(&samples), Ok(2));
    }

    #[test]
    fn restored_version_continues_counting() {
        let mut det = PlaqueDetector::default().with_model_version(7);
        let samples: Vec<_> = (0..5).map(|i| sample(&format!("{i}"))).collect();
        assert_eq!(det.retrain(&samples), Ok(8));
    }

    #[test]
    fn invalid_options_fail_construction() {
        let mut opts = DetectorOptions::default();
        opts.preprocess.blur_kernel_size = 4;
        assert!(PlaqueDetector::new(opts).is_err());
    }

    #[test]
    fn params_are_checked_before_the_image() {
        let det = PlaqueDetector::default();
        let empty = PixelBuffer::Gray(ImageU8::new(0, 0, &[]));
        let bad = DetectionParams {
            min_radius: 60,
            max_radius: 50,
            ..Default::default()
        };
        assert!(matches!(
            det.detect(&empty, Some(&bad)),
            Err(DetectionError::InvalidParameters(_))
        ));
        assert!(matches!(
            det.detect(&empty, None),
            Err(DetectionError::ImageLoad(_))
        ));
    }

    #[test]
    fn report_counts_both_detectors() {
        let det = PlaqueDetector::default();
        let data = vec![128u8; 64 * 48];
        let img = PixelBuffer::Gray(ImageU8::new(64, 48, &data));
        let report = det.detect_with_report(&img, None).unwrap();
        assert!(report.detections.is_empty());
        assert_eq!(report.hough_candidates, 0);
        assert_eq!(report.contour_candidates, 0);
        assert_eq!((report.input.width, report.input.height), (64, 48));
        assert_eq!(report.timings.stages.len(), 4);
    }
}
