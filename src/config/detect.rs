use crate::detector::DetectorOptions;
use crate::types::DetectionParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Where the JSON report goes; printed to stdout when absent.
    pub json_out: Option<PathBuf>,
    /// Directory receiving intermediate images.
    pub debug_dir: Option<PathBuf>,
}

/// Configuration shared by `plaque_detect` and `preprocess_dump`.
#[derive(Clone, Debug, Deserialize)]
pub struct DetectToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: DetectionParams,
    #[serde(default)]
    pub options: DetectorOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<DetectToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<DetectToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}
