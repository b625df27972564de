use serde::Serialize;

use super::catalog::{FuseTypeId, fuse_types};
use super::layout::{
    HINT_TEXT, PopupLayout, hint_position, icon_rect, popup_layout, tallest_icon_height,
};
use super::selection::SelectionState;
use super::zone::{DiagramPoint, DiagramRect, ZoneCategory};

const BODY_OUTLINE_PATH: &str = "M40,60 C40,20 160,20 160,60 L170,100 L170,240 L160,280 C160,300 40,300 40,280 L30,240 L30,100 Z";
const WINDSHIELD_PATH: &str = "M45,80 L155,80 L150,110 L50,110 Z";
const REAR_WINDOW_PATH: &str = "M50,230 L150,230 L155,250 L45,250 Z";
const BODY_OUTLINE_POINTS: [DiagramPoint; 14] = [
    DiagramPoint::new(40.0, 60.0),
    DiagramPoint::new(55.0, 32.0),
    DiagramPoint::new(100.0, 30.0),
    DiagramPoint::new(145.0, 32.0),
    DiagramPoint::new(160.0, 60.0),
    DiagramPoint::new(170.0, 100.0),
    DiagramPoint::new(170.0, 240.0),
    DiagramPoint::new(160.0, 280.0),
    DiagramPoint::new(145.0, 294.0),
    DiagramPoint::new(100.0, 295.0),
    DiagramPoint::new(55.0, 294.0),
    DiagramPoint::new(40.0, 280.0),
    DiagramPoint::new(30.0, 240.0),
    DiagramPoint::new(30.0, 100.0),
];
const WINDSHIELD_POINTS: [DiagramPoint; 4] = [
    DiagramPoint::new(45.0, 80.0),
    DiagramPoint::new(155.0, 80.0),
    DiagramPoint::new(150.0, 110.0),
    DiagramPoint::new(50.0, 110.0),
];
const REAR_WINDOW_POINTS: [DiagramPoint; 4] = [
    DiagramPoint::new(50.0, 230.0),
    DiagramPoint::new(150.0, 230.0),
    DiagramPoint::new(155.0, 250.0),
    DiagramPoint::new(45.0, 250.0),
];
const LABEL_COLOR: &str = "#334155";
const HALO_PADDING: f32 = 3.0;
/// Gap between a zone label baseline and the top of the icon cluster.
const LABEL_ICON_GAP: f32 = 1.0;
/// One full fade out and back of the active zone.
pub const ZONE_PULSE_SECONDS: f32 = 2.0;
/// Opacity the active zone fades down to mid-pulse.
pub const ZONE_PULSE_LOW_OPACITY: f32 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl SceneStyle {
    fn active_zone() -> Self {
        Self {
            fill: "#3b82f6",
            stroke: "#2563eb",
            stroke_width: 1.0,
            opacity: 0.8,
        }
    }

    fn inactive_zone() -> Self {
        Self {
            fill: "#e2e8f0",
            stroke: "#cbd5e1",
            stroke_width: 1.0,
            opacity: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneElement {
    Path {
        id: &'static str,
        /// SVG path data; curves are exact here.
        d: &'static str,
        /// Flattened convex outline for painters without path support.
        points: &'static [DiagramPoint],
        style: SceneStyle,
    },
    Zone {
        zone: ZoneCategory,
        rect: DiagramRect,
        active: bool,
        /// Fades between `style.opacity` and [`ZONE_PULSE_LOW_OPACITY`].
        pulse: bool,
        style: SceneStyle,
    },
    Label {
        text: String,
        position: DiagramPoint,
        font_size: f32,
        color: &'static str,
    },
    FuseIcon {
        fuse: FuseTypeId,
        rect: DiagramRect,
        color: &'static str,
        amperage: &'static str,
        selected: bool,
        /// Highlight ring, present only on the selected icon.
        halo: Option<DiagramRect>,
    },
    Hint {
        text: &'static str,
        position: DiagramPoint,
    },
    Popup {
        layout: PopupLayout,
        label: &'static str,
        era: &'static str,
        amperage: &'static str,
        description: &'static str,
    },
    Legend {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramScene {
    pub category: ZoneCategory,
    pub selected: Option<FuseTypeId>,
    pub elements: Vec<SceneElement>,
}

impl DiagramScene {
    pub fn active_zones(&self) -> Vec<ZoneCategory> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                SceneElement::Zone {
                    zone, active: true, ..
                } => Some(*zone),
                _ => None,
            })
            .collect()
    }

    pub fn pulsing_zones(&self) -> Vec<ZoneCategory> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                SceneElement::Zone {
                    zone, pulse: true, ..
                } => Some(*zone),
                _ => None,
            })
            .collect()
    }

    pub fn zone_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, SceneElement::Zone { .. }))
            .count()
    }

    pub fn icons(&self) -> Vec<(FuseTypeId, DiagramRect, bool)> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                SceneElement::FuseIcon {
                    fuse,
                    rect,
                    selected,
                    ..
                } => Some((*fuse, *rect, *selected)),
                _ => None,
            })
            .collect()
    }

    pub fn popup(&self) -> Option<&SceneElement> {
        self.elements
            .iter()
            .find(|element| matches!(element, SceneElement::Popup { .. }))
    }

    pub fn has_hint(&self) -> bool {
        self.elements
            .iter()
            .any(|element| matches!(element, SceneElement::Hint { .. }))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FuseDiagramRenderInput<'a> {
    pub category: ZoneCategory,
    pub selection: &'a SelectionState,
}

pub struct FuseDiagramRenderer;

impl FuseDiagramRenderer {
    pub fn render(input: FuseDiagramRenderInput<'_>) -> DiagramScene {
        let category = input.category;
        let selected = input.selection.selected();
        let mut elements = vec![
            SceneElement::Path {
                id: "body",
                d: BODY_OUTLINE_PATH,
                points: &BODY_OUTLINE_POINTS,
                style: SceneStyle {
                    fill: "#ffffff",
                    stroke: "#1e293b",
                    stroke_width: 2.0,
                    opacity: 1.0,
                },
            },
            SceneElement::Path {
                id: "windshield",
                d: WINDSHIELD_PATH,
                points: &WINDSHIELD_POINTS,
                style: window_style(),
            },
            SceneElement::Path {
                id: "rear-window",
                d: REAR_WINDOW_PATH,
                points: &REAR_WINDOW_POINTS,
                style: window_style(),
            },
        ];

        for zone in ZoneCategory::ZONES {
            let Some(rect) = zone.rect() else {
                continue;
            };
            let active = zone == category;
            elements.push(SceneElement::Zone {
                zone,
                rect,
                active,
                pulse: active,
                style: if active {
                    SceneStyle::active_zone()
                } else {
                    SceneStyle::inactive_zone()
                },
            });
        }

        for zone in ZoneCategory::ZONES {
            let Some(rect) = zone.rect() else {
                continue;
            };
            let wide = rect.width >= 100.0;
            elements.push(SceneElement::Label {
                text: zone.short_label().to_owned(),
                position: zone_label_position(zone, rect, wide),
                font_size: if wide { 10.0 } else { 8.0 },
                color: LABEL_COLOR,
            });
        }

        if category.is_known() {
            for fuse_type in fuse_types() {
                let Some(rect) = icon_rect(category, fuse_type.id) else {
                    continue;
                };
                let is_selected = selected == Some(fuse_type.id);
                elements.push(SceneElement::FuseIcon {
                    fuse: fuse_type.id,
                    rect,
                    color: fuse_type.color,
                    amperage: fuse_type.amperage,
                    selected: is_selected,
                    halo: is_selected.then(|| rect.expand(HALO_PADDING)),
                });
            }

            match selected.and_then(|fuse| popup_layout(category, fuse)) {
                Some(layout) => {
                    let fuse_type = layout.fuse.fuse_type();
                    elements.push(SceneElement::Popup {
                        layout,
                        label: fuse_type.label,
                        era: fuse_type.era,
                        amperage: fuse_type.amperage,
                        description: fuse_type.description,
                    });
                }
                None => {
                    if let Some(position) = hint_position(category) {
                        elements.push(SceneElement::Hint {
                            text: HINT_TEXT,
                            position,
                        });
                    }
                }
            }
        }

        elements.push(SceneElement::Legend {
            text: category.legend(),
        });

        DiagramScene {
            category,
            selected,
            elements,
        }
    }
}

fn window_style() -> SceneStyle {
    SceneStyle {
        fill: "#f1f5f9",
        stroke: "#94a3b8",
        stroke_width: 1.0,
        opacity: 1.0,
    }
}

/// Opacity of a pulsing zone `seconds` into the animation, starting at `high`.
pub fn pulse_opacity(high: f32, seconds: f64) -> f32 {
    let phase = (seconds / f64::from(ZONE_PULSE_SECONDS)).fract() as f32;
    let swing = (high - ZONE_PULSE_LOW_OPACITY) / 2.0;
    ZONE_PULSE_LOW_OPACITY + swing + swing * (phase * std::f32::consts::TAU).cos()
}

/// Baseline of a zone label, kept clear of the icon cluster on the anchor.
fn zone_label_position(zone: ZoneCategory, rect: DiagramRect, wide: bool) -> DiagramPoint {
    let inset = if wide { 10.0 } else { 8.0 };
    let mut baseline = rect.y + inset;
    if let Some(anchor) = zone.anchor() {
        baseline = baseline.min(anchor.y - tallest_icon_height() / 2.0 - LABEL_ICON_GAP);
    }
    DiagramPoint::new(rect.center().x, baseline)
}
