// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style declarations and the per-state style set.
//!
//! A [`Style`] is a flat map of CSS property names to values. Styles compose by
//! shallow union: later layers overwrite earlier ones key by key, which is how the
//! theme, the per-instance overrides, and the active/disabled variants stack up.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// A flat set of style declarations, keyed by CSS property name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Style {
    declarations: BTreeMap<String, String>,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set one declaration.
    #[must_use]
    pub fn with(mut self, property: &str, value: &str) -> Self {
        self.set(property, value);
        self
    }

    /// Set one declaration, replacing any previous value for `property`.
    pub fn set(&mut self, property: &str, value: &str) {
        self.declarations
            .insert(property.to_string(), value.to_string());
    }

    /// Look up the value of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Returns `true` if there are no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Iterate declarations in property-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Shallow union: returns `self` overlaid with every declaration of `top`.
    #[must_use]
    pub fn merged(&self, top: &Self) -> Self {
        let mut out = self.clone();
        out.extend(top);
        out
    }

    /// Overlay every declaration of `top` onto `self` in place.
    pub fn extend(&mut self, top: &Self) {
        for (k, v) in &top.declarations {
            self.declarations.insert(k.clone(), v.clone());
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Style {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (k, v) in iter {
            style.set(k, v);
        }
        style
    }
}

/// One style per visual state of the widget.
///
/// Used twice: once as the theme ([`StyleSet::builtin`]) and once as the
/// per-instance overrides, which start empty and are merged over the theme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StyleSet {
    /// Shared base for every segment.
    pub base: Style,
    /// Segments above the effective value.
    pub default: Style,
    /// Segments at or below the effective value.
    pub highlighted: Style,
    /// Overlay on highlighted segments while pressed.
    pub active: Style,
    /// Segments above the effective value while disabled.
    pub disabled_default: Style,
    /// Segments at or below the effective value while disabled.
    pub disabled_highlighted: Style,
    /// Wrapper focus style.
    pub focus: Style,
    /// Wrapper hover style, injected as a `:hover` rule.
    pub hover: Style,
    /// Wrapper hover style while disabled, injected as a disabled `:hover` rule.
    pub disabled_hover: Style,
    /// Wrapper style.
    pub wrapper: Style,
}

impl StyleSet {
    /// The built-in theme.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            base: Style::new()
                .with("font-size", "25px")
                .with("display", "inline-block")
                .with("cursor", "pointer")
                .with("padding", "0 2px")
                .with("user-select", "none"),
            default: Style::new().with("color", "#ccc"),
            highlighted: Style::new().with("color", "#fdb627"),
            active: Style::new().with("color", "#f59e0b"),
            disabled_default: Style::new()
                .with("color", "#e5e5e5")
                .with("cursor", "not-allowed"),
            disabled_highlighted: Style::new()
                .with("color", "#fbe7a6")
                .with("cursor", "not-allowed"),
            focus: Style::new()
                .with("outline", "0")
                .with("box-shadow", "0 0 0 2px rgba(140, 224, 255, 0.6)"),
            hover: Style::new(),
            disabled_hover: Style::new(),
            wrapper: Style::new()
                .with("display", "inline-block")
                .with("position", "relative")
                .with("border-radius", "3px"),
        }
    }
}
