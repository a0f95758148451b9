/// Actions emitted by the widget in `InteractionResult`.
/// These flow upward from the widget to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    /// A candidate was written back into the field. `retain_focus` tells the
    /// host whether the field should keep focus after the commit.
    Committed { value: String, retain_focus: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}
