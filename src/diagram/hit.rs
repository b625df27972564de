//! Click routing for the diagram.
//!
//! A click is delivered to exactly one target. The popup sits on top of the
//! icon cluster, which sits on top of the background, so a click on an icon
//! or on the popup never reaches the background dismiss handler.

use super::catalog::fuse_types;
use super::events::ClickTarget;
use super::layout::{icon_hit_rect, popup_layout};
use super::selection::SelectionState;
use super::zone::{DiagramPoint, ZoneCategory};

pub fn resolve_click(
    category: ZoneCategory,
    selection: &SelectionState,
    point: DiagramPoint,
) -> ClickTarget {
    if let Some(popup) = selection
        .selected()
        .and_then(|fuse| popup_layout(category, fuse))
    {
        if popup.close.contains(point) {
            return ClickTarget::PopupClose;
        }
        if popup.rect.contains(point) {
            return ClickTarget::Popup;
        }
    }

    for fuse_type in fuse_types() {
        if icon_hit_rect(category, fuse_type.id).is_some_and(|rect| rect.contains(point)) {
            return ClickTarget::Icon { fuse: fuse_type.id };
        }
    }

    ClickTarget::Background
}
