//! Hover, focus, and selection tracking for map regions.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Something the user did to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "region_code", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// Pointer moved onto a region.
    PointerEnter(String),
    /// Pointer left a region.
    PointerLeave(String),
    /// Keyboard focus moved to a region.
    Focus(String),
    /// Keyboard focus left a region.
    Blur(String),
    /// Click, Enter, or Space on a region. Toggles its selection.
    Activate(String),
    /// Selection set from outside, e.g. a URL parameter.
    Select(Option<String>),
}

/// Which slot currently drives the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// No region is hovered, focused, or selected.
    #[strum(to_string = "대기")]
    Idle,
    /// Only a hovered region is held.
    #[strum(to_string = "hover 미리보기")]
    Hovered,
    /// A focused region is held and nothing is selected.
    #[strum(to_string = "키보드 포커스")]
    Focused,
    /// A selection is held. It wins over focus and hover.
    #[strum(to_string = "선택 고정")]
    Selected,
}

/// Independent hover, focus, and selection slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    /// Region under the pointer.
    pub hovered: Option<String>,
    /// Region with keyboard focus.
    pub focused: Option<String>,
    /// Region pinned by a click or the URL.
    pub selected: Option<String>,
}

impl InteractionState {
    /// State with an initial selection.
    #[must_use]
    pub fn with_selection(selected: Option<String>) -> Self {
        Self {
            selected: selected.filter(|code| !code.is_empty()),
            ..Self::default()
        }
    }

    /// Applies `event`. Returns `true` if the selection changed.
    ///
    /// Leave and blur only clear their slot when they refer to the region
    /// the slot currently holds.
    pub fn apply(&mut self, event: InteractionEvent) -> bool {
        let before = self.selected.clone();

        match event {
            InteractionEvent::PointerEnter(code) => self.hovered = Some(code),
            InteractionEvent::PointerLeave(code) => clear_if_held(&mut self.hovered, &code),
            InteractionEvent::Focus(code) => self.focused = Some(code),
            InteractionEvent::Blur(code) => clear_if_held(&mut self.focused, &code),
            InteractionEvent::Activate(code) => {
                if self.selected.as_deref() == Some(code.as_str()) {
                    self.selected = None;
                } else {
                    self.selected = Some(code);
                }
            }
            InteractionEvent::Select(code) => {
                self.selected = code.filter(|code| !code.is_empty());
            }
        }

        let changed = before != self.selected;
        if changed {
            log::debug!("Selection changed: {before:?} -> {:?}", self.selected);
        }
        changed
    }

    /// Region shown in the detail panel: selected, else focused, else
    /// hovered.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .or(self.focused.as_deref())
            .or(self.hovered.as_deref())
    }

    /// Slot that drives the detail panel.
    #[must_use]
    pub const fn mode(&self) -> InteractionMode {
        if self.selected.is_some() {
            InteractionMode::Selected
        } else if self.focused.is_some() {
            InteractionMode::Focused
        } else if self.hovered.is_some() {
            InteractionMode::Hovered
        } else {
            InteractionMode::Idle
        }
    }

    /// Whether `region_code` is the active region.
    #[must_use]
    pub fn is_active(&self, region_code: &str) -> bool {
        self.active() == Some(region_code)
    }
}

fn clear_if_held(slot: &mut Option<String>, code: &str) {
    if slot.as_deref() == Some(code) {
        *slot = None;
    }
}
