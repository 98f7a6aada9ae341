//! Render output derived from the controller's state.

use crate::core::{Footprint, VisualState};
use serde::{Deserialize, Serialize};

/// Accessible label while the spinner is shown.
pub const WAITING_LABEL: &str = "Waiting for action to complete";
/// Accessible label while the success tick is shown.
pub const SUCCESS_LABEL: &str = "Action completed";

/// Icon that replaces the control's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Spinner,
    Success,
}

impl Icon {
    /// Icon name as understood by the host's icon set.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spinner => "spinner",
            Self::Success => "success",
        }
    }

    pub fn accessible_label(&self) -> &'static str {
        match self {
            Self::Spinner => WAITING_LABEL,
            Self::Success => SUCCESS_LABEL,
        }
    }
}

/// What the control renders in place of its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Content {
    Children,
    Icon(Icon),
}

/// Everything the presentation layer needs from the controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Render {
    pub state: VisualState,
    pub disabled: bool,
    pub icon: Option<Icon>,
    pub accessible_label: Option<&'static str>,
    /// Fixed size to apply, or `None` to let the control size naturally.
    pub applied_size: Option<Footprint>,
}

impl Render {
    /// Derive the render output. Pure.
    ///
    /// `disabled_override` wins when set; otherwise the control is disabled
    /// exactly while loading.
    ///
    /// # Example
    ///
    /// ```rust
    /// use action_feedback::controller::{Icon, Render, WAITING_LABEL};
    /// use action_feedback::core::{Footprint, VisualState};
    ///
    /// let size = Footprint::new(36.0, 100.0).unwrap();
    /// let render = Render::derive(VisualState::Loading, Some(size), None);
    ///
    /// assert!(render.disabled);
    /// assert_eq!(render.icon, Some(Icon::Spinner));
    /// assert_eq!(render.accessible_label, Some(WAITING_LABEL));
    /// assert_eq!(render.applied_size, Some(size));
    /// ```
    pub fn derive(
        state: VisualState,
        footprint: Option<Footprint>,
        disabled_override: Option<bool>,
    ) -> Self {
        let icon = match state {
            VisualState::Idle => None,
            VisualState::Loading => Some(Icon::Spinner),
            VisualState::Success => Some(Icon::Success),
        };

        Self {
            state,
            disabled: disabled_override.unwrap_or(state == VisualState::Loading),
            icon,
            accessible_label: icon.map(|icon| icon.accessible_label()),
            applied_size: footprint,
        }
    }

    pub fn content(&self) -> Content {
        match self.icon {
            Some(icon) => Content::Icon(icon),
            None => Content::Children,
        }
    }
}
