use serde::Serialize;

use super::catalog::FuseTypeId;

/// A single user interaction, already routed to its most specific target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagramInput {
    ClickIcon { fuse: FuseTypeId },
    /// Click inside the popup that is not on its close control.
    ClickPopup,
    ClosePopup,
    ClickBackground,
}

/// Layered click targets, highest routing priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ClickTarget {
    PopupClose,
    Popup,
    Icon { fuse: FuseTypeId },
    Background,
}

impl ClickTarget {
    pub fn input(self) -> DiagramInput {
        match self {
            Self::PopupClose => DiagramInput::ClosePopup,
            Self::Popup => DiagramInput::ClickPopup,
            Self::Icon { fuse } => DiagramInput::ClickIcon { fuse },
            Self::Background => DiagramInput::ClickBackground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClickTarget, DiagramInput};
    use crate::diagram::catalog::FuseTypeId;

    #[test]
    fn each_target_maps_to_one_input() {
        assert_eq!(ClickTarget::PopupClose.input(), DiagramInput::ClosePopup);
        assert_eq!(ClickTarget::Popup.input(), DiagramInput::ClickPopup);
        assert_eq!(
            ClickTarget::Icon {
                fuse: FuseTypeId::Micro
            }
            .input(),
            DiagramInput::ClickIcon {
                fuse: FuseTypeId::Micro
            }
        );
        assert_eq!(
            ClickTarget::Background.input(),
            DiagramInput::ClickBackground
        );
    }

    #[test]
    fn input_serializes_with_kind_tag() {
        let value = serde_json::to_value(DiagramInput::ClickIcon {
            fuse: FuseTypeId::Standard,
        })
        .expect("input should serialize");
        assert_eq!(value["kind"], "click_icon");
        assert_eq!(value["fuse"], "standard");
    }
}
