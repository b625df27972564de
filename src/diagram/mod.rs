//! Interactive fuse zone diagram.
//!
//! [`FuseDiagram`] is one widget instance: the active zone supplied by the
//! caller plus the widget-local fuse selection. Rendering goes through
//! [`renderer::FuseDiagramRenderer`], which produces a backend-neutral scene
//! consumed by [`svg`] and by the native [`viewer`].

use tracing::debug;

pub mod catalog;
pub mod events;
pub mod hit;
pub mod layout;
pub mod renderer;
pub mod selection;
pub mod svg;
pub mod viewer;
pub mod zone;

use self::events::{ClickTarget, DiagramInput};
use self::hit::resolve_click;
use self::renderer::{DiagramScene, FuseDiagramRenderInput, FuseDiagramRenderer};
use self::selection::SelectionState;
use self::zone::{DiagramPoint, ZoneCategory};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuseDiagram {
    category: ZoneCategory,
    selection: SelectionState,
}

impl FuseDiagram {
    pub fn new(category: ZoneCategory) -> Self {
        Self {
            category,
            selection: SelectionState::default(),
        }
    }

    pub fn category(&self) -> ZoneCategory {
        self.category
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Replaces the externally owned zone. The selection is kept.
    pub fn set_category(&mut self, category: ZoneCategory) {
        self.category = category;
    }

    /// Routes a diagram-space click to its target and applies it.
    pub fn click(&mut self, point: DiagramPoint) -> ClickTarget {
        let target = resolve_click(self.category, &self.selection, point);
        self.apply(target.input());
        debug!(
            x = point.x,
            y = point.y,
            ?target,
            selected = ?self.selection.selected(),
            "diagram click"
        );
        target
    }

    pub fn apply(&mut self, input: DiagramInput) {
        self.selection.apply(input);
    }

    pub fn scene(&self) -> DiagramScene {
        FuseDiagramRenderer::render(FuseDiagramRenderInput {
            category: self.category,
            selection: &self.selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FuseDiagram;
    use super::catalog::FuseTypeId;
    use super::events::ClickTarget;
    use super::layout::{icon_center, popup_layout};
    use super::renderer::SceneElement;
    use super::zone::{DiagramPoint, ZoneCategory};

    fn icon(category: ZoneCategory, fuse: FuseTypeId) -> DiagramPoint {
        icon_center(category, fuse).expect("icon for known zone")
    }

    #[test]
    fn icon_click_selects_without_reaching_background() {
        let mut diagram = FuseDiagram::new(ZoneCategory::EngineBay);
        let target = diagram.click(icon(ZoneCategory::EngineBay, FuseTypeId::Standard));
        assert_eq!(
            target,
            ClickTarget::Icon {
                fuse: FuseTypeId::Standard
            }
        );
        assert_eq!(diagram.selection().selected(), Some(FuseTypeId::Standard));

        let scene = diagram.scene();
        let Some(SceneElement::Popup { label, era, .. }) = scene.popup() else {
            panic!("popup should be visible after icon click");
        };
        assert_eq!(*label, "Standard (ATO)");
        assert_eq!(*era, "1976 – 2010s");

        diagram.click(icon(ZoneCategory::EngineBay, FuseTypeId::Standard));
        assert_eq!(diagram.selection().selected(), None);
        assert!(diagram.scene().popup().is_none());
    }

    #[test]
    fn background_click_clears_selection() {
        let mut diagram = FuseDiagram::new(ZoneCategory::Trunk);
        diagram.click(icon(ZoneCategory::Trunk, FuseTypeId::Mini));
        let target = diagram.click(DiagramPoint::new(2.0, 2.0));
        assert_eq!(target, ClickTarget::Background);
        assert_eq!(diagram.selection().selected(), None);
    }

    #[test]
    fn popup_body_click_is_contained_and_close_control_clears() {
        let mut diagram = FuseDiagram::new(ZoneCategory::Trunk);
        diagram.click(icon(ZoneCategory::Trunk, FuseTypeId::Micro));
        let popup = popup_layout(ZoneCategory::Trunk, FuseTypeId::Micro).expect("trunk popup");

        let target = diagram.click(DiagramPoint::new(popup.rect.x + 3.0, popup.rect.y + 30.0));
        assert_eq!(target, ClickTarget::Popup);
        assert_eq!(diagram.selection().selected(), Some(FuseTypeId::Micro));

        let target = diagram.click(popup.close.center());
        assert_eq!(target, ClickTarget::PopupClose);
        assert_eq!(diagram.selection().selected(), None);
    }

    #[test]
    fn switching_icons_moves_selection() {
        let mut diagram = FuseDiagram::new(ZoneCategory::PassengerDash);
        diagram.click(icon(ZoneCategory::PassengerDash, FuseTypeId::Mini));
        diagram.click(icon(ZoneCategory::PassengerDash, FuseTypeId::Standard));
        assert_eq!(diagram.selection().selected(), Some(FuseTypeId::Standard));
    }

    #[test]
    fn category_change_preserves_selection() {
        let mut diagram = FuseDiagram::new(ZoneCategory::DriverDash);
        diagram.click(icon(ZoneCategory::DriverDash, FuseTypeId::Mini));
        diagram.set_category(ZoneCategory::Trunk);
        assert_eq!(diagram.selection().selected(), Some(FuseTypeId::Mini));
        assert!(diagram.scene().popup().is_some());

        diagram.set_category(ZoneCategory::Unknown);
        assert_eq!(diagram.selection().selected(), Some(FuseTypeId::Mini));
        assert!(diagram.scene().popup().is_none());
    }

    #[test]
    fn separate_instances_do_not_share_selection() {
        let mut first = FuseDiagram::new(ZoneCategory::EngineBay);
        let second = FuseDiagram::new(ZoneCategory::EngineBay);
        first.click(icon(ZoneCategory::EngineBay, FuseTypeId::Mini));
        assert_eq!(first.selection().selected(), Some(FuseTypeId::Mini));
        assert_eq!(second.selection().selected(), None);
    }

    #[test]
    fn clicks_on_unknown_category_are_inert() {
        let mut diagram = FuseDiagram::new(ZoneCategory::Unknown);
        let target = diagram.click(DiagramPoint::new(100.0, 52.5));
        assert_eq!(target, ClickTarget::Background);
        assert_eq!(diagram.selection().selected(), None);
        assert_eq!(diagram.scene(), diagram.scene());
    }
}
