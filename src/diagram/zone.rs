use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical width of the diagram canvas.
pub const DIAGRAM_WIDTH: f32 = 200.0;
/// Logical height of the diagram canvas.
pub const DIAGRAM_HEIGHT: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    pub x: f32,
    pub y: f32,
}

impl DiagramPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DiagramRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered_on(center: DiagramPoint, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn center(&self) -> DiagramPoint {
        DiagramPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: DiagramPoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

/// Fuse box location on the vehicle, as classified by the lookup service.
///
/// Anything the lookup reports that is not one of the four physical zones is
/// folded into [`ZoneCategory::Unknown`], both when parsing strings and when
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneCategory {
    EngineBay,
    DriverDash,
    PassengerDash,
    Trunk,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ZoneCategory {
    /// The four highlightable zones, in paint order.
    pub const ZONES: [ZoneCategory; 4] = [
        Self::EngineBay,
        Self::DriverDash,
        Self::PassengerDash,
        Self::Trunk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EngineBay => "engine_bay",
            Self::DriverDash => "driver_dash",
            Self::PassengerDash => "passenger_dash",
            Self::Trunk => "trunk",
            Self::Unknown => "unknown",
        }
    }

    /// Lenient parse; never fails.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "engine_bay" => Self::EngineBay,
            "driver_dash" => Self::DriverDash,
            "passenger_dash" => Self::PassengerDash,
            "trunk" => Self::Trunk,
            _ => Self::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Center point the fuse icon cluster is laid out around.
    pub fn anchor(self) -> Option<DiagramPoint> {
        match self {
            Self::EngineBay => Some(DiagramPoint::new(100.0, 52.5)),
            Self::DriverDash => Some(DiagramPoint::new(65.0, 130.0)),
            Self::PassengerDash => Some(DiagramPoint::new(135.0, 130.0)),
            Self::Trunk => Some(DiagramPoint::new(100.0, 270.0)),
            Self::Unknown => None,
        }
    }

    pub fn rect(self) -> Option<DiagramRect> {
        match self {
            Self::EngineBay => Some(DiagramRect::new(50.0, 30.0, 100.0, 45.0)),
            Self::DriverDash => Some(DiagramRect::new(40.0, 115.0, 50.0, 30.0)),
            Self::PassengerDash => Some(DiagramRect::new(110.0, 115.0, 50.0, 30.0)),
            Self::Trunk => Some(DiagramRect::new(50.0, 255.0, 100.0, 30.0)),
            Self::Unknown => None,
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Self::EngineBay => "ENGINE",
            Self::DriverDash => "DRIVER",
            Self::PassengerDash => "PASS.",
            Self::Trunk => "TRUNK",
            Self::Unknown => "",
        }
    }

    pub fn legend(self) -> String {
        format!("Diagram: {}", self.as_str().replace('_', " "))
    }
}

impl Display for ZoneCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneCategory {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(value))
    }
}
