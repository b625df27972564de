//! Diagram-space geometry for the fuse icon cluster and its detail popup.
//!
//! Everything here is a pure function of the active zone and a fuse type id,
//! so the renderer, the hit resolver and the native viewer all agree on where
//! things are.

use serde::Serialize;

use super::catalog::{FuseTypeId, fuse_types};
use super::zone::{DIAGRAM_HEIGHT, DIAGRAM_WIDTH, DiagramPoint, DiagramRect, ZoneCategory};

/// Horizontal distance between neighbouring icon centers.
pub const ICON_STEP: f32 = 24.0;
/// Extra slack around each icon that still counts as a hit.
pub const ICON_HIT_PADDING: f32 = 3.0;
pub const POPUP_WIDTH: f32 = 124.0;
pub const POPUP_HEIGHT: f32 = 70.0;
/// Gap between the icon edge and the popup edge.
pub const POPUP_GAP: f32 = 6.0;
pub const CLOSE_CONTROL_SIZE: f32 = 10.0;
pub const HINT_TEXT: &str = "Tap a fuse to identify";

const HINT_GAP: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupSide {
    Above,
    Below,
}

impl PopupSide {
    /// Anchors in the lower half of the canvas open upwards.
    pub fn for_anchor(anchor: DiagramPoint) -> Self {
        if anchor.y > DIAGRAM_HEIGHT / 2.0 {
            Self::Above
        } else {
            Self::Below
        }
    }
}

/// Position as a percentage of the rendered container, for overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentPoint {
    pub left: f32,
    pub top: f32,
}

impl PercentPoint {
    pub fn from_diagram(point: DiagramPoint) -> Self {
        Self {
            left: point.x * 100.0 / DIAGRAM_WIDTH,
            top: point.y * 100.0 / DIAGRAM_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupLayout {
    pub fuse: FuseTypeId,
    pub anchor: DiagramPoint,
    pub anchor_percent: PercentPoint,
    pub side: PopupSide,
    pub rect: DiagramRect,
    pub close: DiagramRect,
}

/// Offset of the icon at `index` from the cluster center.
pub fn icon_offset(index: usize) -> f32 {
    let middle = (fuse_types().len() as f32 - 1.0) / 2.0;
    (index as f32 - middle) * ICON_STEP
}

pub fn icon_center(category: ZoneCategory, fuse: FuseTypeId) -> Option<DiagramPoint> {
    let anchor = category.anchor()?;
    Some(DiagramPoint::new(
        anchor.x + icon_offset(fuse.index()),
        anchor.y,
    ))
}

pub fn icon_rect(category: ZoneCategory, fuse: FuseTypeId) -> Option<DiagramRect> {
    let center = icon_center(category, fuse)?;
    let fuse_type = fuse.fuse_type();
    Some(DiagramRect::centered_on(
        center,
        fuse_type.width,
        fuse_type.height,
    ))
}

pub fn icon_hit_rect(category: ZoneCategory, fuse: FuseTypeId) -> Option<DiagramRect> {
    icon_rect(category, fuse).map(|rect| rect.expand(ICON_HIT_PADDING))
}

/// Where the "tap to identify" label goes; on the same side the popup opens.
pub fn hint_position(category: ZoneCategory) -> Option<DiagramPoint> {
    let anchor = category.anchor()?;
    let half_height = tallest_icon_height() / 2.0;
    let y = match PopupSide::for_anchor(anchor) {
        PopupSide::Above => anchor.y - half_height - HINT_GAP,
        PopupSide::Below => anchor.y + half_height + HINT_GAP,
    };
    Some(DiagramPoint::new(anchor.x, y))
}

pub fn popup_layout(category: ZoneCategory, fuse: FuseTypeId) -> Option<PopupLayout> {
    let anchor = icon_center(category, fuse)?;
    let half_icon = fuse.fuse_type().height / 2.0;
    let side = PopupSide::for_anchor(anchor);

    let x = (anchor.x - POPUP_WIDTH / 2.0).clamp(0.0, DIAGRAM_WIDTH - POPUP_WIDTH);
    let y = match side {
        PopupSide::Above => anchor.y - half_icon - POPUP_GAP - POPUP_HEIGHT,
        PopupSide::Below => anchor.y + half_icon + POPUP_GAP,
    };
    let rect = DiagramRect::new(x, y, POPUP_WIDTH, POPUP_HEIGHT);
    let close = DiagramRect::new(
        rect.right() - CLOSE_CONTROL_SIZE - 2.0,
        rect.y + 2.0,
        CLOSE_CONTROL_SIZE,
        CLOSE_CONTROL_SIZE,
    );

    Some(PopupLayout {
        fuse,
        anchor,
        anchor_percent: PercentPoint::from_diagram(anchor),
        side,
        rect,
        close,
    })
}

pub(crate) fn tallest_icon_height() -> f32 {
    fuse_types()
        .iter()
        .map(|fuse_type| fuse_type.height)
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::{
        DIAGRAM_HEIGHT, DIAGRAM_WIDTH, ICON_STEP, PercentPoint, PopupSide, hint_position,
        icon_center, icon_offset, icon_rect, popup_layout,
    };
    use crate::diagram::catalog::FuseTypeId;
    use crate::diagram::zone::{DiagramPoint, ZoneCategory};

    #[test]
    fn icons_are_centered_on_zone_anchor() {
        assert_eq!(icon_offset(0), -ICON_STEP);
        assert_eq!(icon_offset(1), 0.0);
        assert_eq!(icon_offset(2), ICON_STEP);

        let anchor = ZoneCategory::EngineBay.anchor().expect("engine bay anchor");
        assert_eq!(
            icon_center(ZoneCategory::EngineBay, FuseTypeId::Standard),
            Some(anchor)
        );
        assert_eq!(
            icon_center(ZoneCategory::EngineBay, FuseTypeId::Mini),
            Some(DiagramPoint::new(anchor.x - ICON_STEP, anchor.y))
        );
    }

    #[test]
    fn unknown_category_has_no_geometry() {
        assert_eq!(icon_center(ZoneCategory::Unknown, FuseTypeId::Mini), None);
        assert_eq!(icon_rect(ZoneCategory::Unknown, FuseTypeId::Mini), None);
        assert_eq!(popup_layout(ZoneCategory::Unknown, FuseTypeId::Mini), None);
        assert_eq!(hint_position(ZoneCategory::Unknown), None);
    }

    #[test]
    fn popup_opens_above_for_trunk_and_below_for_engine_bay() {
        let trunk = popup_layout(ZoneCategory::Trunk, FuseTypeId::Standard).expect("trunk popup");
        assert_eq!(trunk.side, PopupSide::Above);
        assert!(trunk.rect.bottom() < trunk.anchor.y);
        assert!(trunk.rect.y >= 0.0);

        let engine =
            popup_layout(ZoneCategory::EngineBay, FuseTypeId::Standard).expect("engine popup");
        assert_eq!(engine.side, PopupSide::Below);
        assert!(engine.rect.y > engine.anchor.y);
        assert!(engine.rect.bottom() <= DIAGRAM_HEIGHT);
    }

    #[test]
    fn popup_flips_only_strictly_below_canvas_middle() {
        assert_eq!(
            PopupSide::for_anchor(DiagramPoint::new(100.0, 150.0)),
            PopupSide::Below
        );
        assert_eq!(
            PopupSide::for_anchor(DiagramPoint::new(100.0, 150.1)),
            PopupSide::Above
        );
    }

    #[test]
    fn popup_stays_inside_canvas_horizontally() {
        for zone in ZoneCategory::ZONES {
            for fuse in [FuseTypeId::Mini, FuseTypeId::Standard, FuseTypeId::Micro] {
                let popup = popup_layout(zone, fuse).expect("popup for known zone");
                assert!(popup.rect.x >= 0.0, "{zone}/{fuse} overflows left");
                assert!(popup.rect.right() <= DIAGRAM_WIDTH, "{zone}/{fuse} overflows right");
                assert!(popup.rect.contains(popup.close.center()));
            }
        }
    }

    #[test]
    fn popup_anchor_percent_tracks_icon_offset() {
        let popup =
            popup_layout(ZoneCategory::Trunk, FuseTypeId::Micro).expect("trunk micro popup");
        assert_eq!(popup.anchor, DiagramPoint::new(100.0 + ICON_STEP, 270.0));
        assert_eq!(popup.anchor_percent, PercentPoint { left: 62.0, top: 90.0 });
    }

    #[test]
    fn hint_sits_on_popup_side() {
        let engine = hint_position(ZoneCategory::EngineBay).expect("engine hint");
        assert!(engine.y > 52.5);
        let trunk = hint_position(ZoneCategory::Trunk).expect("trunk hint");
        assert!(trunk.y < 270.0);
    }
}
