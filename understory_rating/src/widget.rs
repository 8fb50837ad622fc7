// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rating widget: lifecycle, event handling, and rendering.
//!
//! [`Rating`] wires the pieces together:
//!
//! raw event → [`InputNormalizer`] → intents → [`WidgetState`] → [`project`].
//!
//! Every raw event is interpreted first and then forwarded verbatim to the
//! listener configured for its kind, whether or not the widget is disabled.
//! Style injection is driven by the lifecycle instead of by events: [`Rating::mount`]
//! installs the pseudo-class rules, [`Rating::update`] reinstalls them, and
//! [`Rating::unmount`] removes them.
//!
//! ```
//! use understory_rating::config::Configuration;
//! use understory_rating::inject::{InstanceIds, StyleSheet};
//! use understory_rating::input::RawEvent;
//! use understory_rating::value::RatingValue;
//! use understory_rating::widget::Rating;
//!
//! let mut sheet = StyleSheet::new();
//! let mut ids = InstanceIds::new();
//!
//! let mut rating = Rating::new(Configuration::new().with_default_value(2));
//! rating.mount(ids.next_id(), &mut sheet);
//! assert_eq!(sheet.len(), 1);
//!
//! let four = RatingValue::new(4).unwrap();
//! rating.handle_event(&RawEvent::PointerEnter { segment: four });
//! assert_eq!(rating.render().highlighted_count(), 4);
//! assert_eq!(rating.value(), RatingValue::new(2));
//!
//! rating.handle_event(&RawEvent::Click { segment: four });
//! assert_eq!(rating.value(), Some(four));
//!
//! rating.unmount(&mut sheet).unwrap();
//! assert!(sheet.is_empty());
//! ```

use kurbo::Rect;

use crate::config::{Attributes, Configuration, sanitize_attributes};
use crate::error::RatingError;
use crate::inject::{self, InstanceId, StyleIds, StyleRegistry};
use crate::input::{InputNormalizer, RawEvent};
use crate::project::{RenderOutput, project};
use crate::state::{Commit, Mode, WidgetState};
use crate::value::RatingValue;

/// What the host should do after an event was handled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the event's default action.
    pub default_prevented: bool,
    /// The commit the event produced, if any.
    pub commit: Option<Commit>,
}

/// One star-rating widget instance.
#[derive(Debug)]
pub struct Rating {
    config: Configuration,
    state: WidgetState,
    normalizer: InputNormalizer,
    attributes: Attributes,
    ids: Option<StyleIds>,
}

impl Rating {
    /// Create an unmounted widget.
    ///
    /// The initial value is the controlled value, or else the default value.
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        let state = WidgetState::new(config.value.initial_value());
        let attributes = sanitize_attributes(&config.attributes);
        Self {
            config,
            state,
            normalizer: InputNormalizer::new(),
            attributes,
            ids: None,
        }
    }

    /// Assign the instance identity and install the pseudo-class rules.
    ///
    /// Mounting again under a new identity first removes the old rules.
    pub fn mount<R: StyleRegistry + ?Sized>(&mut self, instance: InstanceId, registry: &mut R) {
        if let Some(old) = self.ids.take() {
            inject::remove(registry, &old.wrapper);
        }
        let ids = StyleIds::for_instance(instance);
        log::debug!("mounting rating {}", ids.wrapper);
        inject::install(registry, &self.config.pseudo_class_rules(&ids.wrapper));
        self.ids = Some(ids);
    }

    /// Reconcile with a new configuration snapshot.
    ///
    /// A controlled value replaces the internal one; an uncontrolled widget keeps
    /// its value. Passthrough attributes are re-sanitized and, when mounted, the
    /// pseudo-class rules are reinstalled.
    pub fn update<R>(&mut self, config: Configuration, registry: &mut R)
    where
        R: StyleRegistry + ?Sized,
    {
        if let Some(external) = config.value.external_value() {
            self.state.set_value(external);
        }
        self.attributes = sanitize_attributes(&config.attributes);
        self.config = config;
        if let Some(ids) = &self.ids {
            log::debug!("updating rating {}", ids.wrapper);
            inject::install(registry, &self.config.pseudo_class_rules(&ids.wrapper));
        }
    }

    /// Remove the pseudo-class rules. Call exactly once when the widget goes away.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::NotMounted`] if the widget is not mounted.
    pub fn unmount<R>(&mut self, registry: &mut R) -> Result<(), RatingError>
    where
        R: StyleRegistry + ?Sized,
    {
        let ids = self.ids.take().ok_or(RatingError::NotMounted)?;
        log::debug!("unmounting rating {}", ids.wrapper);
        inject::remove(registry, &ids.wrapper);
        Ok(())
    }

    /// Interpret one raw event, then forward it to its listener.
    pub fn handle_event(&mut self, event: &RawEvent) -> EventResponse {
        let disabled = self.config.disabled;
        let normalized = self.normalizer.normalize(event, &self.state, disabled);
        let mode = Mode {
            disabled,
            controlled: self.config.value.is_controlled(),
        };
        let mut response = EventResponse {
            default_prevented: normalized.prevent_default,
            commit: None,
        };
        for intent in normalized.intents {
            if let Some(commit) = self.state.apply(intent, mode) {
                self.config.value.request_change(commit.value);
                self.config.callbacks.notify_change(commit.value);
                response.commit = Some(commit);
            }
        }
        self.config.callbacks.dispatch(event);
        response
    }

    /// Project the current state to visual output.
    #[must_use]
    pub fn render(&self) -> RenderOutput {
        let ids = self.ids.as_ref();
        project(&self.state, &self.config, ids, &self.attributes)
    }

    /// Clear the value and any preview.
    pub fn reset_value(&mut self) {
        self.state.clear();
    }

    /// Set the wrapper bounds used to map touch positions to segments.
    pub fn set_wrapper_bounds(&mut self, bounds: Rect) {
        self.normalizer.set_wrapper_bounds(bounds);
    }

    /// The committed value.
    #[must_use]
    pub fn value(&self) -> Option<RatingValue> {
        self.state.value()
    }

    /// The full widget state.
    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// The current configuration snapshot.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The scoped class names, while mounted.
    #[must_use]
    pub fn style_ids(&self) -> Option<&StyleIds> {
        self.ids.as_ref()
    }
}
