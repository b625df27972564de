use super::catalog::FuseTypeId;
use super::events::DiagramInput;

/// Which fuse type, if any, has its detail popup open.
///
/// Owned by a single diagram instance. The active zone is not part of this
/// state, so switching categories keeps the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected: Option<FuseTypeId>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<FuseTypeId> {
        self.selected
    }

    pub fn is_selected(&self, fuse: FuseTypeId) -> bool {
        self.selected == Some(fuse)
    }

    pub fn with_selected(selected: Option<FuseTypeId>) -> Self {
        Self { selected }
    }

    pub fn apply(&mut self, input: DiagramInput) {
        match input {
            DiagramInput::ClickIcon { fuse } => {
                self.selected = if self.is_selected(fuse) {
                    None
                } else {
                    Some(fuse)
                };
            }
            DiagramInput::ClickPopup => {}
            DiagramInput::ClosePopup | DiagramInput::ClickBackground => self.selected = None,
        }
    }
}
