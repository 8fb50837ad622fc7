// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input normalization: raw pointer, touch, and keyboard events to [`Intent`]s.
//!
//! ## Policies
//!
//! - Entering a segment previews it. Only leaving the whole wrapper resets, so
//!   sliding across adjacent segments re-previews without an intermediate reset.
//! - Pointer down activates and pointer up deactivates.
//! - Touch start activates. Touch end deactivates and commits the last preview (or
//!   the current value when no drag happened). Touch cancel deactivates and resets.
//! - A touch move with exactly one touch point maps its horizontal position onto
//!   five equal bands of the wrapper bounds and previews the band under it. Moves
//!   that stay inside the band already previewed are coalesced. Multi-touch moves
//!   are ignored.
//! - A click on a segment commits it.
//! - Arrow down/left and arrow up/right step the preview, Enter and Space confirm,
//!   Escape cancels. Recognized keys ask the host to prevent the default action,
//!   unless the widget is disabled.
//!
//! Normalization never suppresses an event: the caller still forwards every raw
//! event to its external listener after applying the intents.

use alloc::string::String;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::state::{Intent, KeyIntent, WidgetState};
use crate::value::{Preview, RatingValue, SEGMENT_COUNT};

/// Touch points of a touch event, in the same coordinate space as the wrapper bounds.
pub type TouchPoints = SmallVec<[Point; 2]>;

/// A key, as named by the host (DOM `KeyboardEvent.key` naming).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `ArrowUp`
    ArrowUp,
    /// `ArrowDown`
    ArrowDown,
    /// `ArrowLeft`
    ArrowLeft,
    /// `ArrowRight`
    ArrowRight,
    /// `Enter`
    Enter,
    /// The space bar (`" "`).
    Space,
    /// `Escape`
    Escape,
    /// Any other key.
    Other(String),
}

impl Key {
    /// Parse a DOM key name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.into()),
        }
    }

    /// The rating action bound to this key, if any.
    #[must_use]
    pub fn intent(&self) -> Option<KeyIntent> {
        match self {
            Self::ArrowDown | Self::ArrowLeft => Some(KeyIntent::Decrement),
            Self::ArrowUp | Self::ArrowRight => Some(KeyIntent::Increment),
            Self::Enter | Self::Space => Some(KeyIntent::Confirm),
            Self::Escape => Some(KeyIntent::Cancel),
            Self::Other(_) => None,
        }
    }
}

/// A raw event delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent {
    /// The pointer entered a segment.
    PointerEnter {
        /// The segment entered.
        segment: RatingValue,
    },
    /// The pointer moved over a segment. Forwarded only; no intent.
    PointerMove {
        /// The segment under the pointer.
        segment: RatingValue,
    },
    /// The pointer left the wrapper.
    PointerLeave,
    /// A pointer button was pressed.
    PointerDown,
    /// A pointer button was released.
    PointerUp,
    /// A touch started.
    TouchStart {
        /// Active touch points on the wrapper.
        touches: TouchPoints,
    },
    /// A touch moved.
    TouchMove {
        /// Active touch points on the wrapper.
        touches: TouchPoints,
    },
    /// A touch ended.
    TouchEnd,
    /// A touch was canceled by the host.
    TouchCancel,
    /// A segment was clicked.
    Click {
        /// The segment clicked.
        segment: RatingValue,
    },
    /// A key was pressed while the wrapper had focus.
    KeyDown {
        /// The key.
        key: Key,
    },
    /// The wrapper gained focus.
    Focus,
    /// The wrapper lost focus.
    Blur,
}

impl RawEvent {
    /// The kind of this event, for listener lookup.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerEnter { .. } => EventKind::PointerEnter,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::PointerDown => EventKind::PointerDown,
            Self::PointerUp => EventKind::PointerUp,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchMove { .. } => EventKind::TouchMove,
            Self::TouchEnd => EventKind::TouchEnd,
            Self::TouchCancel => EventKind::TouchCancel,
            Self::Click { .. } => EventKind::Click,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Focus => EventKind::Focus,
            Self::Blur => EventKind::Blur,
        }
    }
}

/// Discriminant of [`RawEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`RawEvent::PointerEnter`]
    PointerEnter,
    /// [`RawEvent::PointerMove`]
    PointerMove,
    /// [`RawEvent::PointerLeave`]
    PointerLeave,
    /// [`RawEvent::PointerDown`]
    PointerDown,
    /// [`RawEvent::PointerUp`]
    PointerUp,
    /// [`RawEvent::TouchStart`]
    TouchStart,
    /// [`RawEvent::TouchMove`]
    TouchMove,
    /// [`RawEvent::TouchEnd`]
    TouchEnd,
    /// [`RawEvent::TouchCancel`]
    TouchCancel,
    /// [`RawEvent::Click`]
    Click,
    /// [`RawEvent::KeyDown`]
    KeyDown,
    /// [`RawEvent::Focus`]
    Focus,
    /// [`RawEvent::Blur`]
    Blur,
}

/// The intents for one raw event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Intents to apply, in order.
    pub intents: SmallVec<[Intent; 2]>,
    /// The host should suppress the event's default action (scrolling, activation).
    pub prevent_default: bool,
}

/// Map a horizontal position onto the five equal bands of `bounds`.
///
/// Positions left of the wrapper preview [`Preview::Empty`]; positions at or past
/// the right edge preview five. Returns `None` for degenerate bounds.
#[must_use]
pub fn preview_at(bounds: Rect, x: f64) -> Option<Preview> {
    let width = bounds.width();
    if !(width.is_finite() && width > 0.0 && x.is_finite()) {
        return None;
    }
    let offset = x - bounds.x0;
    if offset < 0.0 {
        return Some(Preview::Empty);
    }
    if offset >= width {
        return Some(Preview::Value(RatingValue::MAX));
    }
    let band = width / f64::from(SEGMENT_COUNT);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset / band lies in [0, 5), so the truncated band index fits in u8."
    )]
    let index = (offset / band) as u8;
    Some(Preview::from_stars(index + 1))
}

/// Translator from [`RawEvent`]s to [`Intent`]s.
#[derive(Clone, Debug, Default)]
pub struct InputNormalizer {
    wrapper_bounds: Option<Rect>,
}

impl InputNormalizer {
    /// Create a normalizer without wrapper bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrapper bounds used to map touch positions to segments.
    pub fn set_wrapper_bounds(&mut self, bounds: Rect) {
        self.wrapper_bounds = Some(bounds);
    }

    /// The wrapper bounds, if the host has provided them.
    #[must_use]
    pub fn wrapper_bounds(&self) -> Option<Rect> {
        self.wrapper_bounds
    }

    /// Translate one raw event against the current state.
    ///
    /// A touch move previews the band under the finger unless that band is already
    /// the preview in effect.
    pub fn normalize(
        &self,
        event: &RawEvent,
        state: &WidgetState,
        disabled: bool,
    ) -> Normalized {
        let mut out = Normalized::default();
        match event {
            RawEvent::PointerEnter { segment } => {
                out.intents.push(Intent::Preview(Preview::Value(*segment)));
            }
            RawEvent::PointerMove { .. } => {}
            RawEvent::PointerLeave => out.intents.push(Intent::Reset),
            RawEvent::PointerDown => out.intents.push(Intent::Activate),
            RawEvent::PointerUp => out.intents.push(Intent::Deactivate),
            RawEvent::TouchStart { .. } => out.intents.push(Intent::Activate),
            RawEvent::TouchMove { touches } => {
                if let ([touch], Some(bounds)) = (touches.as_slice(), self.wrapper_bounds)
                    && let Some(preview) = preview_at(bounds, touch.x)
                    && state.focused_value() != Some(preview)
                {
                    out.intents.push(Intent::Preview(preview));
                }
            }
            RawEvent::TouchEnd => {
                out.intents.push(Intent::Deactivate);
                out.intents.push(Intent::Commit(state.resolved_commit()));
            }
            RawEvent::TouchCancel => {
                out.intents.push(Intent::Deactivate);
                out.intents.push(Intent::Reset);
            }
            RawEvent::Click { segment } => out.intents.push(Intent::Commit(Some(*segment))),
            RawEvent::KeyDown { key } => {
                if let Some(action) = key.intent().filter(|_| !disabled) {
                    out.prevent_default = true;
                    out.intents.push(state.resolve_key(action));
                }
            }
            RawEvent::Focus => out.intents.push(Intent::Focus),
            RawEvent::Blur => out.intents.push(Intent::Blur),
        }
        log::trace!("{:?} -> {:?}", event.kind(), out.intents);
        out
    }
}
