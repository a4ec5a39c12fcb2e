mod common;

use common::synthetic_image::{disks_u8, gray_to_rgb, uniform_u8, Disk};
use plaque_detector::hough::detect_circles;
use plaque_detector::image::{ImageRgb8, ImageU8};
use plaque_detector::preprocess::{preprocess, PreprocessOptions};
use plaque_detector::threshold::detect_by_threshold;
use plaque_detector::types::MAX_RADIUS_LIMIT;
use plaque_detector::{
    Detection, DetectionError, DetectionParams, DetectorOptions, FeedbackSample, OverlapMetric,
    PixelBuffer, PlaqueDetector,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scenario_params() -> DetectionParams {
    DetectionParams {
        min_radius: 5,
        max_radius: 50,
        sensitivity: 30,
        min_distance: 20,
    }
}

fn iou(a: &Detection, b: &Detection) -> f32 {
    let (ba, bb) = (a.bounding_box(), b.bounding_box());
    let inter = ba.intersection_area(&bb) as f32;
    inter / ((ba.area() + bb.area()) as f32 - inter)
}

#[test]
fn single_dark_disk_yields_one_detection() {
    init_logging();
    let (w, h) = (200usize, 200usize);
    let buffer = disks_u8(w, h, 200, &[Disk::dark(100.0, 100.0, 20.0)]);
    let image = PixelBuffer::Gray(ImageU8::new(w, h, &buffer));

    let detector = PlaqueDetector::default();
    let dets = detector
        .detect(&image, Some(&scenario_params()))
        .expect("detection should succeed");

    assert_eq!(dets.len(), 1, "expected exactly one plaque, got {dets:?}");
    let d = dets[0];
    assert!(
        (d.x - 100).abs() <= 3 && (d.y - 100).abs() <= 3,
        "centre off: {d:?}"
    );
    assert!((d.radius - 20).abs() <= 3, "radius off: {d:?}");
}

#[test]
fn close_disks_collapse_to_one_detection() {
    init_logging();
    let (w, h) = (200usize, 200usize);
    let buffer = disks_u8(
        w,
        h,
        200,
        &[Disk::dark(95.0, 100.0, 15.0), Disk::dark(105.0, 100.0, 15.0)],
    );
    let image = PixelBuffer::Gray(ImageU8::new(w, h, &buffer));

    let dets = PlaqueDetector::default()
        .detect(&image, Some(&scenario_params()))
        .unwrap();
    assert_eq!(dets.len(), 1, "expected the overlap to be merged: {dets:?}");
}

#[test]
fn containment_metric_keeps_the_same_survivors_on_scenarios() {
    init_logging();
    let (w, h) = (200usize, 200usize);
    let single = disks_u8(w, h, 200, &[Disk::dark(100.0, 100.0, 20.0)]);
    let pair = disks_u8(
        w,
        h,
        200,
        &[Disk::dark(95.0, 100.0, 15.0), Disk::dark(105.0, 100.0, 15.0)],
    );

    let mut options = DetectorOptions::default();
    options.suppression.metric = OverlapMetric::Containment;
    let legacy = PlaqueDetector::new(options).unwrap();
    let iou = PlaqueDetector::default();

    for buffer in [&single, &pair] {
        let image = PixelBuffer::Gray(ImageU8::new(w, h, buffer));
        let report = legacy
            .detect_with_report(&image, Some(&scenario_params()))
            .unwrap();
        assert!(report.hough_candidates + report.contour_candidates >= 1);
        assert_eq!(report.detections.len(), 1, "{:?}", report.detections);
        let reference = iou.detect(&image, Some(&scenario_params())).unwrap();
        assert_eq!(report.detections, reference);
    }
}

#[test]
fn uniform_image_is_empty_for_both_detectors() {
    init_logging();
    let (w, h) = (160usize, 120usize);
    let buffer = uniform_u8(w, h, 128);
    let image = PixelBuffer::Gray(ImageU8::new(w, h, &buffer));

    let gray = preprocess(&image, &PreprocessOptions::default()).unwrap();
    let params = scenario_params();
    assert!(detect_circles(&gray, &params).is_empty());
    assert!(detect_by_threshold(&gray, &params).is_empty());
    assert!(PlaqueDetector::default()
        .detect(&image, Some(&params))
        .unwrap()
        .is_empty());
}

#[test]
fn inverted_radius_range_is_rejected() {
    let (w, h) = (64usize, 64usize);
    let buffer = uniform_u8(w, h, 128);
    let image = PixelBuffer::Gray(ImageU8::new(w, h, &buffer));
    let params = DetectionParams {
        min_radius: 60,
        max_radius: 50,
        ..scenario_params()
    };
    let err = PlaqueDetector::default()
        .detect(&image, Some(&params))
        .unwrap_err();
    assert!(
        matches!(err, DetectionError::InvalidParameters(_)),
        "unexpected error: {err}"
    );
}

#[test]
fn oversized_radius_is_rejected_not_panicking() {
    let (w, h) = (200usize, 200usize);
    let buffer = disks_u8(w, h, 200, &[Disk::dark(100.0, 100.0, 20.0)]);
    let image = PixelBuffer::Gray(ImageU8::new(w, h, &buffer));
    let params = DetectionParams {
        max_radius: 3_000_000_000,
        ..scenario_params()
    };
    let outcome =
        std::panic::catch_unwind(|| PlaqueDetector::default().detect(&image, Some(&params)));
    let result = outcome.expect("detection must not panic");
    assert!(
        matches!(result, Err(DetectionError::InvalidParameters(_))),
        "unexpected result: {result:?}"
    );

    let at_limit = DetectionParams {
        max_radius: MAX_RADIUS_LIMIT,
        ..scenario_params()
    };
    let dets = PlaqueDetector::default()
        .detect(&image, Some(&at_limit))
        .unwrap();
    for d in &dets {
        assert!(d.radius >= 5 && d.radius as u32 <= MAX_RADIUS_LIMIT, "{d:?}");
    }
}

#[test]
fn empty_buffer_is_a_load_error() {
    let image = PixelBuffer::Gray(ImageU8::new(0, 0, &[]));
    let err = PlaqueDetector::default().detect(&image, None).unwrap_err();
    assert!(matches!(err, DetectionError::ImageLoad(_)), "{err}");

    let short = vec![0u8; 10];
    let image = PixelBuffer::Rgb(ImageRgb8::new(8, 8, &short));
    assert!(matches!(
        PlaqueDetector::default().detect(&image, None),
        Err(DetectionError::ImageLoad(_))
    ));
}

#[test]
fn detection_is_deterministic_and_rgb_matches_gray() {
    init_logging();
    let (w, h) = (240usize, 180usize);
    let disks = [
        Disk::dark(60.0, 60.0, 18.0),
        Disk::dark(170.0, 70.0, 25.0),
        Disk::dark(110.0, 140.0, 12.0),
    ];
    let gray_buf = disks_u8(w, h, 190, &disks);
    let rgb_buf = gray_to_rgb(&gray_buf);
    let gray = PixelBuffer::Gray(ImageU8::new(w, h, &gray_buf));
    let rgb = PixelBuffer::Rgb(ImageRgb8::new(w, h, &rgb_buf));

    let detector = PlaqueDetector::default();
    let first = detector.detect(&gray, None).unwrap();
    let second = detector.detect(&gray, None).unwrap();
    let from_rgb = detector.detect(&rgb, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, from_rgb);
}

#[test]
fn results_respect_radius_bounds_and_overlap() {
    init_logging();
    let (w, h) = (300usize, 220usize);
    let disks = [
        Disk::dark(50.0, 50.0, 8.0),
        Disk::dark(140.0, 60.0, 22.0),
        Disk::dark(240.0, 70.0, 35.0),
        Disk::dark(80.0, 160.0, 15.0),
        Disk::dark(200.0, 170.0, 28.0),
    ];
    let buffer = disks_u8(w, h, 210, &disks);
    let image = PixelBuffer::Gray(ImageU8::new(w, h, &buffer));
    let params = DetectionParams {
        min_radius: 10,
        max_radius: 30,
        ..scenario_params()
    };

    let dets = PlaqueDetector::default()
        .detect(&image, Some(&params))
        .unwrap();
    for d in &dets {
        assert!(
            (10..=30).contains(&d.radius),
            "radius outside bounds: {d:?}"
        );
    }
    for (i, a) in dets.iter().enumerate() {
        for b in &dets[i + 1..] {
            assert!(iou(a, b) <= 0.5, "overlapping survivors {a:?} {b:?}");
        }
    }
}

#[test]
fn report_matches_plain_detection() {
    let (w, h) = (200usize, 200usize);
    let buffer = disks_u8(w, h, 200, &[Disk::dark(100.0, 100.0, 20.0)]);
    let image = PixelBuffer::Gray(ImageU8::new(w, h, &buffer));
    let detector = PlaqueDetector::default();

    let report = detector.detect_with_report(&image, None).unwrap();
    let plain = detector.detect(&image, None).unwrap();
    assert_eq!(report.detections, plain);
    assert!(report.hough_candidates + report.contour_candidates >= plain.len());
    assert_eq!(report.input.channels, 1);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["detections"].as_array().map(Vec::len), Some(plain.len()));
    assert!(json["timings"]["totalMs"].as_f64().is_some());
}

#[test]
fn retrain_bumps_version_with_enough_feedback() {
    let mut detector = PlaqueDetector::default();
    let samples: Vec<FeedbackSample> = (0..5)
        .map(|i| FeedbackSample {
            image_id: format!("dish_{i}.png"),
            actual_count: Some(i),
            plaques: vec![Detection::new(10, 10, 5, 1.0)],
        })
        .collect();

    assert!(matches!(
        detector.retrain(&samples[..3]),
        Err(DetectionError::InsufficientData {
            available: 3,
            required: 5
        })
    ));
    assert_eq!(detector.retrain(&samples), Ok(1));
    assert_eq!(detector.model_version(), 1);
}
