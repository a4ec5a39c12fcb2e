use plaque_detector::config::detect::load_config;
use plaque_detector::diagnostics::DetectionReport;
use plaque_detector::image::io::{load_image, write_json_file};
use plaque_detector::PlaqueDetector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: plaque_detect <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let decoded = load_image(&config.input).map_err(|e| e.to_string())?;
    let detector = PlaqueDetector::new(config.options.clone()).map_err(|e| e.to_string())?;
    let report = detector
        .detect_with_report(&decoded.as_buffer(), Some(&config.params))
        .map_err(|e| e.to_string())?;

    print_text_summary(&report);

    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &report)?;
            println!("\nJSON report written to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("\nJSON report:\n{json}");
        }
    }
    Ok(())
}

fn print_text_summary(report: &DetectionReport) {
    println!("Detection summary");
    println!("  {}", report.summary());
    println!(
        "  params: min_radius={} max_radius={} sensitivity={} min_distance={}",
        report.params.min_radius,
        report.params.max_radius,
        report.params.sensitivity,
        report.params.min_distance
    );
    for stage in &report.timings.stages {
        println!("  {:<18} {:>8.3} ms", stage.label, stage.elapsed_ms);
    }
    for (i, d) in report.detections.iter().enumerate() {
        println!(
            "  #{i:<3} x={:<5} y={:<5} r={:<4} conf={:.2}",
            d.x, d.y, d.radius, d.confidence
        );
    }
}
