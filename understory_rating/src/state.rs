// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value/focus state machine.
//!
//! [`WidgetState`] owns the committed value, the transient preview, the pressed
//! flag, and the keyboard-focus flag. It consumes [`Intent`]s produced by the
//! input normalizer and reports a [`Commit`] whenever a value is finalized; the
//! caller turns that into change notifications.
//!
//! ## Transitions
//!
//! | intent        | effect                                                           |
//! |---------------|------------------------------------------------------------------|
//! | `Preview(p)`  | `focused_value = p`; `value` untouched                           |
//! | `Commit(v)`   | clears the preview; sets `value = v` unless the value is controlled |
//! | `Reset`       | clears the preview                                               |
//! | `Activate`    | `active = true`                                                  |
//! | `Deactivate`  | `active = false`                                                 |
//! | `Focus`       | `keyboard_focused = true` unless pressed                         |
//! | `Blur`        | clears `keyboard_focused` and the preview                        |
//!
//! While disabled every intent is ignored except `Deactivate` and `Blur`, so a
//! widget disabled mid-press or mid-focus cannot get stuck in a pressed or focused
//! visual.
//!
//! ```
//! use understory_rating::state::{Intent, Mode, WidgetState};
//! use understory_rating::value::{Preview, RatingValue};
//!
//! let three = RatingValue::new(3).unwrap();
//! let mut state = WidgetState::new(Some(three));
//! let mode = Mode::default();
//!
//! state.apply(Intent::Preview(Preview::Empty), mode);
//! assert_eq!(state.effective_stars(), 0);
//! assert_eq!(state.value(), Some(three));
//!
//! state.apply(Intent::Reset, mode);
//! assert_eq!(state.effective_stars(), 3);
//! ```

use crate::value::{Preview, RatingValue, SEGMENT_COUNT};

/// A normalized input intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Show a transient preview without committing.
    Preview(Preview),
    /// Finalize a value (`None` commits unset).
    Commit(Option<RatingValue>),
    /// Drop the preview.
    Reset,
    /// Pointer or touch pressed.
    Activate,
    /// Pointer or touch released.
    Deactivate,
    /// The widget received focus.
    Focus,
    /// The widget lost focus.
    Blur,
}

/// Keyboard actions, before they are resolved against the current state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyIntent {
    /// One star fewer, down to an empty preview.
    Decrement,
    /// One star more, up to five.
    Increment,
    /// Commit the preview (or re-commit the current value).
    Confirm,
    /// Drop the preview.
    Cancel,
}

/// Configuration bits that change how intents apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Mode {
    /// Ignore everything except `Deactivate` and `Blur`.
    pub disabled: bool,
    /// The value lives outside the widget; commits never write `value`.
    pub controlled: bool,
}

/// A finalized value, reported by [`WidgetState::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// The committed value; `None` is unset.
    pub value: Option<RatingValue>,
}

/// The state of one rating widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetState {
    value: Option<RatingValue>,
    focused_value: Option<Preview>,
    active: bool,
    keyboard_focused: bool,
}

impl WidgetState {
    /// Create a state showing `value` with no preview.
    #[must_use]
    pub fn new(value: Option<RatingValue>) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// The committed value.
    #[must_use]
    pub fn value(&self) -> Option<RatingValue> {
        self.value
    }

    /// The transient preview, if one is in effect.
    #[must_use]
    pub fn focused_value(&self) -> Option<Preview> {
        self.focused_value
    }

    /// Whether a pointer or touch is currently pressed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether focus arrived from the keyboard.
    #[must_use]
    pub fn is_keyboard_focused(&self) -> bool {
        self.keyboard_focused
    }

    /// Number of highlighted segments: the preview if any, else the value, else zero.
    #[must_use]
    pub fn effective_stars(&self) -> u8 {
        match (self.focused_value, self.value) {
            (Some(preview), _) => preview.stars(),
            (None, Some(value)) => value.get(),
            (None, None) => 0,
        }
    }

    /// The value a confirm would commit right now.
    ///
    /// An empty preview resolves to unset, any other preview to its value, and no
    /// preview to the current value unchanged.
    #[must_use]
    pub fn resolved_commit(&self) -> Option<RatingValue> {
        match self.focused_value {
            Some(preview) => preview.committed(),
            None => self.value,
        }
    }

    /// Turn a keyboard action into an intent against the current state.
    #[must_use]
    pub fn resolve_key(&self, key: KeyIntent) -> Intent {
        let current = self.effective_stars();
        match key {
            KeyIntent::Decrement => Intent::Preview(Preview::from_stars(current.saturating_sub(1))),
            KeyIntent::Increment => {
                let next = if current == 0 {
                    1
                } else {
                    (current + 1).min(SEGMENT_COUNT)
                };
                Intent::Preview(Preview::from_stars(next))
            }
            KeyIntent::Confirm => Intent::Commit(self.resolved_commit()),
            KeyIntent::Cancel => Intent::Reset,
        }
    }

    /// Apply one intent. Returns the commit, if the intent finalized a value.
    pub fn apply(&mut self, intent: Intent, mode: Mode) -> Option<Commit> {
        if mode.disabled && !matches!(intent, Intent::Deactivate | Intent::Blur) {
            log::trace!("ignoring {intent:?} while disabled");
            return None;
        }
        log::trace!("applying {intent:?}");
        match intent {
            Intent::Preview(preview) => {
                self.focused_value = Some(preview);
                None
            }
            Intent::Commit(value) => {
                self.focused_value = None;
                if !mode.controlled {
                    self.value = value;
                }
                Some(Commit { value })
            }
            Intent::Reset => {
                self.focused_value = None;
                None
            }
            Intent::Activate => {
                self.active = true;
                None
            }
            Intent::Deactivate => {
                self.active = false;
                None
            }
            Intent::Focus => {
                if !self.active {
                    self.keyboard_focused = true;
                }
                None
            }
            Intent::Blur => {
                self.keyboard_focused = false;
                self.focused_value = None;
                None
            }
        }
    }

    /// Overwrite the committed value from an external source.
    pub fn set_value(&mut self, value: Option<RatingValue>) {
        self.value = value;
    }

    /// Clear both the committed value and the preview.
    pub fn clear(&mut self) {
        self.value = None;
        self.focused_value = None;
    }
}
