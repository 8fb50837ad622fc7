// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Rating: a headless five-star rating input.
//!
//! ## Overview
//!
//! The crate models the behavior of a star-rating control without owning a
//! rendering or windowing layer. The host feeds raw pointer, touch, keyboard, and
//! focus events in and renders the projected output however it likes.
//!
//! - [`input`]: raw events to abstract [`Intent`](state::Intent)s.
//! - [`state`]: the committed value, the transient preview, and the activity and
//!   keyboard-focus flags.
//! - [`project`]: state plus configuration to five segment views, the wrapper view,
//!   and ARIA attributes.
//! - [`inject`]: scoped `:focus` and `:hover` rules, installed into a
//!   [`StyleRegistry`] while an instance is mounted.
//! - [`widget`]: [`Rating`] ties the four together and owns the lifecycle.
//!
//! ## Values
//!
//! A committed value is an integer in `1..=5` ([`RatingValue`]) or unset. A preview
//! ([`Preview`]) may additionally be [`Preview::Empty`], which shows zero stars and
//! commits "unset".
//!
//! ## Controlled and uncontrolled
//!
//! With [`ValueSource::Uncontrolled`] the widget owns its value. With
//! [`ValueSource::Controlled`] the host does: commits are reported, optionally
//! through a bridge callback, and the displayed value only changes when the host
//! passes a new configuration to [`Rating::update`].
//!
//! ## Listeners
//!
//! Every raw event is interpreted first and then forwarded to the listener for its
//! [`EventKind`](input::EventKind), including while the widget is disabled.
//!
//! ```
//! use understory_rating::{Configuration, RawEvent, Rating, RatingValue, StyleSheet};
//! use understory_rating::inject::InstanceIds;
//!
//! let mut sheet = StyleSheet::new();
//! let mut ids = InstanceIds::new();
//! let mut rating = Rating::new(Configuration::new().on_change(|v| {
//!     assert_eq!(v.map(RatingValue::get), Some(3));
//! }));
//! rating.mount(ids.next_id(), &mut sheet);
//!
//! let three = RatingValue::new(3).unwrap();
//! rating.handle_event(&RawEvent::Click { segment: three });
//!
//! let out = rating.render();
//! assert_eq!(out.highlighted_count(), 3);
//! assert_eq!(out.aria.value_now, Some(3));
//! assert!(sheet.to_css().contains(":focus"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` in dependencies that support it.
//! - `libm`: `no_std` float support for `kurbo`.
//! - `serde`: serialization for values, styles, and style rules.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod inject;
pub mod input;
pub mod project;
pub mod state;
pub mod style;
pub mod value;
pub mod widget;

pub use config::{Configuration, ValueSource};
pub use error::RatingError;
pub use inject::{StyleRegistry, StyleSheet};
pub use input::RawEvent;
pub use project::RenderOutput;
pub use value::{Preview, RatingValue};
pub use widget::Rating;
