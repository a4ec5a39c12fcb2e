use plaque_detector::config::detect::load_config;
use plaque_detector::image::io::{load_image, save_gray_png};
use plaque_detector::preprocess::preprocess;
use plaque_detector::threshold::binary_mask;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args()
        .nth(1)
        .ok_or_else(|| "Usage: preprocess_dump <config.json>".to_string())?;
    let config = load_config(Path::new(&config_path))?;
    let debug_dir = config
        .output
        .debug_dir
        .as_ref()
        .ok_or("output.debug_dir is required")?;
    config.options.validate().map_err(|e| e.to_string())?;

    let decoded = load_image(&config.input).map_err(|e| e.to_string())?;
    let gray = preprocess(&decoded.as_buffer(), &config.options.preprocess)
        .map_err(|e| e.to_string())?;
    let mask =
        binary_mask(&gray, &config.options.threshold).map_err(|e| e.to_string())?;

    let gray_path = debug_dir.join("preprocessed.png");
    let mask_path = debug_dir.join("mask_opened.png");
    save_gray_png(&gray, &gray_path)?;
    save_gray_png(&mask, &mask_path)?;

    println!(
        "{}x{} foreground={} ({:.1}%)",
        gray.w,
        gray.h,
        mask.count_nonzero(),
        100.0 * mask.count_nonzero() as f64 / (gray.w * gray.h) as f64
    );
    println!("Wrote {} and {}", gray_path.display(), mask_path.display());
    Ok(())
}
