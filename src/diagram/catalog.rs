use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuseTypeId {
    Mini,
    Standard,
    Micro,
}

impl FuseTypeId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mini => "mini",
            Self::Standard => "standard",
            Self::Micro => "micro",
        }
    }

    pub fn fuse_type(self) -> &'static FuseType {
        // Catalog order matches variant order.
        &FUSE_TYPES[self.index()]
    }

    pub fn index(self) -> usize {
        match self {
            Self::Mini => 0,
            Self::Standard => 1,
            Self::Micro => 2,
        }
    }
}

impl Display for FuseTypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fuse type `{value}`; expected one of `mini`, `standard`, `micro`")]
pub struct FuseTypeParseError {
    pub value: String,
}

impl FromStr for FuseTypeId {
    type Err = FuseTypeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mini" => Ok(Self::Mini),
            "standard" => Ok(Self::Standard),
            "micro" => Ok(Self::Micro),
            other => Err(FuseTypeParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// One physical blade fuse form factor. Dimensions are in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuseType {
    pub id: FuseTypeId,
    pub label: &'static str,
    pub color: &'static str,
    pub width: f32,
    pub height: f32,
    pub description: &'static str,
    pub era: &'static str,
    pub amperage: &'static str,
}

const FUSE_TYPES: [FuseType; 3] = [
    FuseType {
        id: FuseTypeId::Mini,
        label: "Mini (ATM)",
        color: "#ef4444",
        width: 10.0,
        height: 13.0,
        description: "Compact blade fuse used in most modern fuse panels. Same two-prong layout as the standard blade at roughly half the size.",
        era: "1990s – present",
        amperage: "10A",
    },
    FuseType {
        id: FuseTypeId::Standard,
        label: "Standard (ATO)",
        color: "#3b82f6",
        width: 14.0,
        height: 17.0,
        description: "The original full-size blade fuse. Common in older vehicles and still used for higher-current accessory circuits.",
        era: "1976 – 2010s",
        amperage: "15A",
    },
    FuseType {
        id: FuseTypeId::Micro,
        label: "Micro",
        color: "#eab308",
        width: 8.0,
        height: 11.0,
        description: "Low-profile fuse found in recent vehicles where panel space is tight. Requires a micro-sized puller.",
        era: "2010s – present",
        amperage: "20A",
    },
];

/// The fixed catalog in layout order.
pub fn fuse_types() -> &'static [FuseType] {
    &FUSE_TYPES
}
