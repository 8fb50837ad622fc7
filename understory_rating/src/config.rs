// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration: value source, styles, listeners, passthrough attributes.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::inject::{self, PseudoClassStyles, RuleSet, StyleId};
use crate::input::{EventKind, RawEvent};
use crate::style::StyleSet;
use crate::value::RatingValue;

/// Receives committed values (`None` is unset).
pub type ChangeHandler = Box<dyn FnMut(Option<RatingValue>)>;

/// Receives raw events, verbatim.
pub type EventHandler = Box<dyn FnMut(&RawEvent)>;

/// Extra attributes forwarded to the wrapper element.
pub type Attributes = BTreeMap<String, String>;

/// Where the authoritative value lives.
///
/// Raw values are plain integers; anything outside `1..=5` is treated as unset.
pub enum ValueSource {
    /// The widget owns its value, seeded from `default_value`.
    Uncontrolled {
        /// Initial value.
        default_value: Option<u8>,
    },
    /// The host owns the value. Commits are reported through
    /// `on_request_change` (and `on_change`) but never written locally.
    Controlled {
        /// The externally held value.
        value: Option<u8>,
        /// Bridge invoked with every committed value.
        on_request_change: Option<ChangeHandler>,
    },
}

impl ValueSource {
    /// An uncontrolled source with an initial value.
    #[must_use]
    pub fn uncontrolled(default_value: Option<u8>) -> Self {
        Self::Uncontrolled { default_value }
    }

    /// A controlled source without a change bridge.
    #[must_use]
    pub fn controlled(value: Option<u8>) -> Self {
        Self::Controlled {
            value,
            on_request_change: None,
        }
    }

    /// A controlled source with a change bridge, like a two-way binding.
    pub fn linked(
        value: Option<u8>,
        on_request_change: impl FnMut(Option<RatingValue>) + 'static,
    ) -> Self {
        Self::Controlled {
            value,
            on_request_change: Some(Box::new(on_request_change)),
        }
    }

    /// Returns `true` for [`ValueSource::Controlled`].
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// The value a fresh widget starts with.
    #[must_use]
    pub fn initial_value(&self) -> Option<RatingValue> {
        match self {
            Self::Uncontrolled { default_value } => default_value.and_then(RatingValue::new),
            Self::Controlled { value, .. } => value.and_then(RatingValue::new),
        }
    }

    /// The externally held value; `None` when uncontrolled.
    #[must_use]
    pub fn external_value(&self) -> Option<Option<RatingValue>> {
        match self {
            Self::Uncontrolled { .. } => None,
            Self::Controlled { value, .. } => Some(value.and_then(RatingValue::new)),
        }
    }

    pub(crate) fn request_change(&mut self, value: Option<RatingValue>) {
        if let Self::Controlled {
            on_request_change: Some(handler),
            ..
        } = self
        {
            handler(value);
        }
    }
}

impl Default for ValueSource {
    fn default() -> Self {
        Self::uncontrolled(None)
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncontrolled { default_value } => f
                .debug_struct("Uncontrolled")
                .field("default_value", default_value)
                .finish(),
            Self::Controlled {
                value,
                on_request_change,
            } => f
                .debug_struct("Controlled")
                .field("value", value)
                .field("on_request_change", &on_request_change.is_some())
                .finish(),
        }
    }
}

/// Change notification plus one optional listener per raw event kind.
#[derive(Default)]
pub struct Callbacks {
    /// Invoked on every commit.
    pub on_change: Option<ChangeHandler>,
    listeners: HashMap<EventKind, EventHandler>,
}

impl Callbacks {
    /// Set the listener for `kind`, replacing any previous one.
    pub fn set(&mut self, kind: EventKind, handler: impl FnMut(&RawEvent) + 'static) {
        self.listeners.insert(kind, Box::new(handler));
    }

    /// Whether a listener is registered for `kind`.
    #[must_use]
    pub fn has(&self, kind: EventKind) -> bool {
        self.listeners.contains_key(&kind)
    }

    /// Forward `event` to its listener, if any.
    pub fn dispatch(&mut self, event: &RawEvent) {
        if let Some(handler) = self.listeners.get_mut(&event.kind()) {
            handler(event);
        }
    }

    pub(crate) fn notify_change(&mut self, value: Option<RatingValue>) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(value);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: Vec<_> = self.listeners.keys().collect();
        f.debug_struct("Callbacks")
            .field("on_change", &self.on_change.is_some())
            .field("listeners", &listeners)
            .finish()
    }
}

/// A configuration snapshot for one widget.
///
/// Hosts build a fresh snapshot on every property change and hand it to
/// [`Rating::update`](crate::widget::Rating::update).
#[derive(Debug)]
pub struct Configuration {
    /// Where the value lives.
    pub value: ValueSource,
    /// Ignore interaction; listeners are still invoked.
    pub disabled: bool,
    /// Glyph rendered in each segment.
    pub rating_character: char,
    /// Explicit tab index; `None` means `0`, or `-1` while disabled.
    pub tab_index: Option<i32>,
    /// `aria-label` for the wrapper.
    pub aria_label: Option<String>,
    /// Neutralize the injected `:focus` rule so pointer and touch focus show no
    /// ring; keyboard focus is then styled inline from state.
    pub prevent_focus_style_for_touch_and_click: bool,
    /// Extra class name for every segment.
    pub class_name: Option<String>,
    /// Extra class name for the wrapper.
    pub wrapper_class_name: Option<String>,
    /// Base styles.
    pub theme: StyleSet,
    /// Per-instance overrides, shallow-merged over `theme`.
    pub styles: StyleSet,
    /// Extra wrapper attributes. Keys the widget owns are dropped.
    pub attributes: Attributes,
    /// Change notification and raw event listeners.
    pub callbacks: Callbacks,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            value: ValueSource::default(),
            disabled: false,
            rating_character: '\u{2605}',
            tab_index: None,
            aria_label: Some("rating".to_string()),
            prevent_focus_style_for_touch_and_click: true,
            class_name: None,
            wrapper_class_name: None,
            theme: StyleSet::builtin(),
            styles: StyleSet::default(),
            attributes: Attributes::new(),
            callbacks: Callbacks::default(),
        }
    }
}

impl Configuration {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the value source.
    #[must_use]
    pub fn with_value(mut self, value: ValueSource) -> Self {
        self.value = value;
        self
    }

    /// Builder: uncontrolled with an initial value.
    #[must_use]
    pub fn with_default_value(self, value: u8) -> Self {
        self.with_value(ValueSource::uncontrolled(Some(value)))
    }

    /// Builder: set `disabled`.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: set per-instance style overrides.
    #[must_use]
    pub fn with_styles(mut self, styles: StyleSet) -> Self {
        self.styles = styles;
        self
    }

    /// Builder: set `prevent_focus_style_for_touch_and_click`.
    #[must_use]
    pub fn with_prevent_focus_style(mut self, prevent: bool) -> Self {
        self.prevent_focus_style_for_touch_and_click = prevent;
        self
    }

    /// Builder: add a wrapper attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Builder: set the change notification.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(Option<RatingValue>) + 'static) -> Self {
        self.callbacks.on_change = Some(Box::new(handler));
        self
    }

    /// Builder: set the listener for one raw event kind.
    #[must_use]
    pub fn on(mut self, kind: EventKind, handler: impl FnMut(&RawEvent) + 'static) -> Self {
        self.callbacks.set(kind, handler);
        self
    }

    /// The tab index the wrapper renders with.
    #[must_use]
    pub fn resolved_tab_index(&self) -> i32 {
        match self.tab_index {
            Some(index) => index,
            None if self.disabled => -1,
            None => 0,
        }
    }

    /// The theme with per-instance overrides merged over it, field by field.
    #[must_use]
    pub fn merged_styles(&self) -> StyleSet {
        let (t, o) = (&self.theme, &self.styles);
        StyleSet {
            base: t.base.merged(&o.base),
            default: t.default.merged(&o.default),
            highlighted: t.highlighted.merged(&o.highlighted),
            active: t.active.merged(&o.active),
            disabled_default: t.disabled_default.merged(&o.disabled_default),
            disabled_highlighted: t.disabled_highlighted.merged(&o.disabled_highlighted),
            focus: t.focus.merged(&o.focus),
            hover: t.hover.merged(&o.hover),
            disabled_hover: t.disabled_hover.merged(&o.disabled_hover),
            wrapper: t.wrapper.merged(&o.wrapper),
        }
    }

    /// The pseudo-class rules for the wrapper identified by `target`.
    #[must_use]
    pub fn pseudo_class_rules(&self, target: &StyleId) -> RuleSet {
        let styles = self.merged_styles();
        inject::build_rules(
            target,
            &PseudoClassStyles {
                focus: &styles.focus,
                hover: &styles.hover,
                disabled_hover: &styles.disabled_hover,
                disabled: self.disabled,
                suppress_focus_style: self.prevent_focus_style_for_touch_and_click,
            },
        )
    }
}

/// Attribute names the widget renders itself; passthrough copies are dropped.
const OWNED_ATTRIBUTES: &[&str] = &[
    "value",
    "defaultvalue",
    "disabled",
    "tabindex",
    "style",
    "class",
    "classname",
    "aria-valuemin",
    "aria-valuemax",
    "aria-valuenow",
    "aria-disabled",
    "aria-label",
];

/// Drop attributes the widget owns and inline event handlers.
///
/// Names compare ASCII case-insensitively. Listeners are configured through
/// [`Callbacks`], so any `on*` attribute is dropped too.
#[must_use]
pub fn sanitize_attributes(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .filter(|(name, _)| {
            let owned = OWNED_ATTRIBUTES
                .iter()
                .any(|owned| name.eq_ignore_ascii_case(owned));
            let handler = name.len() > 2 && name.as_bytes()[..2].eq_ignore_ascii_case(b"on");
            !owned && !handler
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
