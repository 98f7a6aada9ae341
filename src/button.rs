//! Presentation wrapper for an action button.
//!
//! Turns a [`Render`] into the classes, style and icon a host renders.

use crate::controller::{Icon, Render};
use crate::core::Footprint;
use serde::{Deserialize, Serialize};

/// Visual style of the button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appearance {
    #[default]
    Base,
    Positive,
    Negative,
    Neutral,
    Link,
    Brand,
}

impl Appearance {
    fn modifier(&self) -> Option<&'static str> {
        match self {
            Self::Base => None,
            Self::Positive => Some("positive"),
            Self::Negative => Some("negative"),
            Self::Neutral => Some("neutral"),
            Self::Link => Some("link"),
            Self::Brand => Some("brand"),
        }
    }

    /// Dark backgrounds need a light icon.
    fn wants_light_icon(&self) -> bool {
        matches!(self, Self::Positive | Self::Negative)
    }
}

/// Static properties of an action button.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub appearance: Appearance,
    pub inline: bool,
    /// Extra class(es) supplied by the caller.
    pub class_name: Option<String>,
}

/// Icon as the host should draw it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IconView {
    pub name: &'static str,
    pub label: &'static str,
    pub spinning: bool,
    pub light: bool,
}

/// Everything needed to draw the button for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ButtonView {
    pub classes: Vec<String>,
    pub disabled: bool,
    /// Fixed size style, `None` for natural sizing.
    pub size: Option<Footprint>,
    /// Replaces the children when present.
    pub icon: Option<IconView>,
}

impl ButtonView {
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl ActionButton {
    pub fn new(appearance: Appearance) -> Self {
        Self {
            appearance,
            ..Self::default()
        }
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Compose the view for a render.
    ///
    /// # Example
    ///
    /// ```rust
    /// use action_feedback::button::{ActionButton, Appearance};
    /// use action_feedback::controller::Render;
    /// use action_feedback::core::{Footprint, VisualState};
    ///
    /// let size = Footprint::new(36.0, 90.0).unwrap();
    /// let render = Render::derive(VisualState::Loading, Some(size), None);
    /// let view = ActionButton::new(Appearance::Positive).view(&render);
    ///
    /// assert_eq!(view.class_attr(), "p-action-button p-button--positive is-processing is-disabled");
    /// assert!(view.icon.unwrap().light);
    /// ```
    pub fn view(&self, render: &Render) -> ButtonView {
        let mut classes = Vec::new();
        if let Some(extra) = self.class_name.as_deref().filter(|c| !c.is_empty()) {
            classes.push(extra.to_string());
        }
        classes.push("p-action-button".to_string());
        classes.push(match self.appearance.modifier() {
            Some(modifier) => format!("p-button--{modifier}"),
            None => "p-button".to_string(),
        });
        if !render.state.is_idle() {
            classes.push("is-processing".to_string());
        }
        if render.disabled {
            classes.push("is-disabled".to_string());
        }
        if self.inline {
            classes.push("is-inline".to_string());
        }

        ButtonView {
            classes,
            disabled: render.disabled,
            size: render.applied_size,
            icon: render.icon.map(|icon| IconView {
                name: icon.name(),
                label: icon.accessible_label(),
                spinning: icon == Icon::Spinner,
                light: self.appearance.wants_light_icon(),
            }),
        }
    }
}
