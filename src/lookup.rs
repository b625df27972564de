use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagram::zone::ZoneCategory;

pub const SAFETY_CHECKLIST: [(&str, &str); 3] = [
    (
        "Ignition OFF",
        "Ensure the vehicle is completely turned off before opening the fuse box.",
    ),
    (
        "Amperage limit",
        "Never replace a fuse with a higher amperage rating than specified.",
    ),
    (
        "Tools",
        "Use a proper fuse puller tool, not metal pliers.",
    ),
];

/// Fuse lookup result for one vehicle circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuseLocation {
    pub box_location: String,
    #[serde(default)]
    pub location_category: ZoneCategory,
    pub fuse_number: String,
    pub amperage: String,
    pub circuit: String,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("failed to read fuse lookup `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fuse lookup `{}` as JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse fuse lookup `{}` as YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported fuse lookup extension for `{}`; expected .json, .yaml or .yml", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupFormat {
    Json,
    Yaml,
}

impl LookupFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

pub fn load_fuse_location(path: &Path) -> Result<FuseLocation, LookupError> {
    let format = LookupFormat::from_path(path).ok_or_else(|| LookupError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let raw = fs::read_to_string(path).map_err(|source| LookupError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let location = match format {
        LookupFormat::Json => {
            serde_json::from_str::<FuseLocation>(&raw).map_err(|source| LookupError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        LookupFormat::Yaml => {
            serde_yaml::from_str::<FuseLocation>(&raw).map_err(|source| LookupError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
    };

    debug!(
        path = %path.display(),
        category = %location.location_category,
        fuse_number = %location.fuse_number,
        "loaded fuse lookup"
    );
    Ok(location)
}
