use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_VIEWER_SCALE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSettings {
    pub bind: String,
    /// Screen pixels per diagram unit in the native viewer.
    pub viewer_scale: f32,
    pub log_dir: Option<PathBuf>,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            viewer_scale: DEFAULT_VIEWER_SCALE,
            log_dir: None,
        }
    }
}

impl DiagramSettings {
    pub fn from_env() -> Result<Self> {
        // Load .env if present, but do not fail if file does not exist.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("FUSE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
        ensure!(!bind.trim().is_empty(), "FUSE_BIND cannot be empty");

        let viewer_scale = match lookup("FUSE_VIEWER_SCALE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("failed to parse FUSE_VIEWER_SCALE `{raw}` as f32"))?,
            None => DEFAULT_VIEWER_SCALE,
        };
        ensure!(
            viewer_scale.is_finite() && viewer_scale > 0.0,
            "FUSE_VIEWER_SCALE must be greater than 0"
        );

        let log_dir = lookup("FUSE_LOG_DIR")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind,
            viewer_scale,
            log_dir,
        })
    }
}
