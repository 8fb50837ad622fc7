// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped pseudo-class style injection.
//!
//! Pseudo-classes such as `:hover` and `:focus` cannot be expressed through
//! per-element inline styles, so the widget synthesizes stylesheet rules scoped to
//! a class name that is unique per mounted instance and installs them into a
//! [`StyleRegistry`].
//!
//! ## Contract
//!
//! - [`install`] is idempotent per [`StyleId`]: installing again fully replaces
//!   the previous rule set for every id that appears in the new rules.
//! - [`remove`] drops every rule for an id. The owning widget calls it exactly once,
//!   on unmount.
//! - Ids must be unique per mounted instance. A colliding id silently overwrites the
//!   earlier instance's rules; this is a precondition, not a checked error.
//!
//! ## Example
//!
//! ```
//! use understory_rating::inject::{self, PseudoClassStyles, StyleId, StyleSheet};
//! use understory_rating::style::Style;
//!
//! let id = StyleId::new("rating-wrapper-style-id-1");
//! let focus = Style::new().with("outline", "1px solid blue");
//! let rules = inject::build_rules(&id, &PseudoClassStyles {
//!     focus: &focus,
//!     hover: &Style::new(),
//!     disabled_hover: &Style::new(),
//!     disabled: false,
//!     suppress_focus_style: false,
//! });
//!
//! let mut sheet = StyleSheet::new();
//! inject::install(&mut sheet, &rules);
//! assert_eq!(
//!     sheet.to_css(),
//!     ".rating-wrapper-style-id-1:focus {outline: 1px solid blue !important;}\n"
//! );
//!
//! inject::remove(&mut sheet, &id);
//! assert!(sheet.is_empty());
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::style::Style;

/// The pseudo-classes the widget injects rules for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PseudoClass {
    /// `:focus`
    Focus,
    /// `:hover`
    Hover,
}

impl PseudoClass {
    /// The CSS name without the leading colon.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Hover => "hover",
        }
    }
}

/// Class-name identifier that scopes injected rules to one element.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StyleId(String);

impl StyleId {
    /// Wrap a class name.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self(class_name.into())
    }

    /// The class name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one mounted widget instance.
///
/// Issued by [`InstanceIds`]; uniqueness among live instances is the caller's
/// responsibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// Monotonic issuer of [`InstanceId`]s.
#[derive(Clone, Debug, Default)]
pub struct InstanceIds {
    next: u64,
}

impl InstanceIds {
    /// Create an issuer starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> InstanceId {
        self.next += 1;
        InstanceId(self.next)
    }
}

/// The scoped class names of one instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleIds {
    /// Class name on the wrapper; pseudo-class rules target this.
    pub wrapper: StyleId,
    /// Class name on every segment.
    pub segment: StyleId,
}

impl StyleIds {
    /// Derive the class names for `instance`.
    #[must_use]
    pub fn for_instance(instance: InstanceId) -> Self {
        Self {
            wrapper: StyleId::new(format!("rating-wrapper-style-id-{}", instance.0)),
            segment: StyleId::new(format!("rating-style-id-{}", instance.0)),
        }
    }
}

/// One injected rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleRule {
    /// Class name the rule is scoped to.
    pub target_id: StyleId,
    /// Pseudo-class the rule applies under.
    pub pseudo_class: PseudoClass,
    /// Declarations applied while the pseudo-class matches.
    pub style: Style,
    /// Only match while the element is marked disabled.
    pub disabled: bool,
}

impl StyleRule {
    /// CSS selector for this rule.
    pub fn selector(&self) -> String {
        let mut out = String::new();
        out.push('.');
        out.push_str(self.target_id.as_str());
        if self.disabled {
            out.push_str("[aria-disabled=\"true\"]");
        }
        out.push(':');
        out.push_str(self.pseudo_class.as_str());
        out
    }

    /// Write this rule as one line of CSS.
    ///
    /// Every declaration carries `!important` so it wins over inline styles.
    pub fn write_css(&self, out: &mut String) {
        out.push_str(&self.selector());
        out.push_str(" {");
        for (i, (property, value)) in self.style.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(" !important;");
        }
        out.push_str("}\n");
    }
}

/// The rules for one scoped id. Never more than three (focus, hover, disabled hover).
pub type RuleSet = SmallVec<[StyleRule; 3]>;

/// Process-wide style storage the injector writes into.
///
/// Hosts implement this over their real style sheet; [`StyleSheet`] is an
/// in-memory implementation that also renders CSS text.
pub trait StyleRegistry {
    /// Replace every rule for `id` with `rules`.
    fn install_rules(&mut self, id: &StyleId, rules: &[StyleRule]);
    /// Drop every rule for `id`.
    fn remove_rules(&mut self, id: &StyleId);
}

/// In-memory [`StyleRegistry`].
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    rules: HashMap<StyleId, RuleSet>,
}

impl StyleSheet {
    /// Create an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules currently installed for `id`.
    pub fn rules_for(&self, id: &StyleId) -> &[StyleRule] {
        self.rules.get(id).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Number of ids with installed rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are installed.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render every installed rule as CSS, ordered by id.
    pub fn to_css(&self) -> String {
        let mut ids: Vec<&StyleId> = self.rules.keys().collect();
        ids.sort();
        let mut out = String::new();
        for id in ids {
            for rule in &self.rules[id] {
                rule.write_css(&mut out);
            }
        }
        out
    }
}

impl StyleRegistry for StyleSheet {
    fn install_rules(&mut self, id: &StyleId, rules: &[StyleRule]) {
        if rules.is_empty() {
            self.rules.remove(id);
        } else {
            let set: RuleSet = rules.iter().cloned().collect();
            self.rules.insert(id.clone(), set);
        }
    }

    fn remove_rules(&mut self, id: &StyleId) {
        self.rules.remove(id);
    }
}

/// Inputs for [`build_rules`], already merged over the theme.
#[derive(Copy, Clone, Debug)]
pub struct PseudoClassStyles<'a> {
    /// Full focus style.
    pub focus: &'a Style,
    /// Hover style; no rule is emitted when empty.
    pub hover: &'a Style,
    /// Hover style while disabled; no rule is emitted when empty.
    pub disabled_hover: &'a Style,
    /// The widget's disabled configuration.
    pub disabled: bool,
    /// Replace the injected focus style with a neutral one. Keyboard focus is then
    /// styled inline by the render projector instead.
    pub suppress_focus_style: bool,
}

/// Synthesize the pseudo-class rules for one scoped element.
///
/// Always emits a focus rule. Emits at most one hover rule: the disabled hover rule
/// when `disabled` is set and a disabled hover style exists, otherwise the plain
/// hover rule when a hover style exists.
pub fn build_rules(target: &StyleId, styles: &PseudoClassStyles<'_>) -> RuleSet {
    let mut rules = RuleSet::new();

    let focus = if styles.suppress_focus_style {
        Style::new().with("outline", "0")
    } else {
        styles.focus.clone()
    };
    rules.push(StyleRule {
        target_id: target.clone(),
        pseudo_class: PseudoClass::Focus,
        style: focus,
        disabled: false,
    });

    if styles.disabled && !styles.disabled_hover.is_empty() {
        rules.push(StyleRule {
            target_id: target.clone(),
            pseudo_class: PseudoClass::Hover,
            style: styles.disabled_hover.clone(),
            disabled: true,
        });
    } else if !styles.hover.is_empty() {
        rules.push(StyleRule {
            target_id: target.clone(),
            pseudo_class: PseudoClass::Hover,
            style: styles.hover.clone(),
            disabled: false,
        });
    }

    rules
}

/// Install `rules` into `registry`, replacing the existing set of every id they name.
///
/// Ids not named by any rule are left untouched.
pub fn install<R: StyleRegistry + ?Sized>(registry: &mut R, rules: &[StyleRule]) {
    let mut seen: SmallVec<[&StyleId; 2]> = SmallVec::new();
    for rule in rules {
        if seen.contains(&&rule.target_id) {
            continue;
        }
        seen.push(&rule.target_id);
        let group: RuleSet = rules
            .iter()
            .filter(|r| r.target_id == rule.target_id)
            .cloned()
            .collect();
        log::debug!(
            "installing {} pseudo-class rule(s) for {}",
            group.len(),
            rule.target_id
        );
        registry.install_rules(&rule.target_id, &group);
    }
}

/// Remove every rule for `id` from `registry`.
pub fn remove<R: StyleRegistry + ?Sized>(registry: &mut R, id: &StyleId) {
    log::debug!("removing pseudo-class rules for {id}");
    registry.remove_rules(id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles<'a>(
        focus: &'a Style,
        hover: &'a Style,
        disabled_hover: &'a Style,
    ) -> PseudoClassStyles<'a> {
        PseudoClassStyles {
            focus,
            hover,
            disabled_hover,
            disabled: false,
            suppress_focus_style: false,
        }
    }

    #[test]
    fn instance_ids_are_distinct_and_scoped() {
        let mut ids = InstanceIds::new();
        let a = StyleIds::for_instance(ids.next_id());
        let b = StyleIds::for_instance(ids.next_id());
        assert_eq!(a.wrapper.as_str(), "rating-wrapper-style-id-1");
        assert_eq!(a.segment.as_str(), "rating-style-id-1");
        assert_ne!(a.wrapper, b.wrapper);
    }

    #[test]
    fn focus_rule_is_always_emitted() {
        let id = StyleId::new("w");
        let empty = Style::new();
        let rules = build_rules(&id, &styles(&empty, &empty, &empty));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].pseudo_class, PseudoClass::Focus);
    }

    #[test]
    fn suppressed_focus_degrades_to_neutral_outline() {
        let id = StyleId::new("w");
        let focus = Style::new().with("box-shadow", "0 0 2px blue");
        let empty = Style::new();
        let mut input = styles(&focus, &empty, &empty);
        input.suppress_focus_style = true;
        let rules = build_rules(&id, &input);
        assert_eq!(rules[0].style, Style::new().with("outline", "0"));
    }

    #[test]
    fn disabled_hover_wins_only_when_disabled() {
        let id = StyleId::new("w");
        let focus = Style::new();
        let hover = Style::new().with("opacity", "0.8");
        let disabled_hover = Style::new().with("opacity", "1");

        let enabled = build_rules(&id, &styles(&focus, &hover, &disabled_hover));
        assert_eq!(enabled.len(), 2);
        assert!(!enabled[1].disabled);
        assert_eq!(enabled[1].style, hover);

        let mut input = styles(&focus, &hover, &disabled_hover);
        input.disabled = true;
        let disabled = build_rules(&id, &input);
        assert_eq!(disabled.len(), 2);
        assert!(disabled[1].disabled);
        assert_eq!(disabled[1].style, disabled_hover);
    }

    #[test]
    fn disabled_without_disabled_hover_falls_back_to_plain_hover() {
        let id = StyleId::new("w");
        let focus = Style::new();
        let hover = Style::new().with("opacity", "0.8");
        let empty = Style::new();
        let mut input = styles(&focus, &hover, &empty);
        input.disabled = true;
        let rules = build_rules(&id, &input);
        assert_eq!(rules.len(), 2);
        assert!(!rules[1].disabled);
    }

    #[test]
    fn reinstall_replaces_previous_rules() {
        let id = StyleId::new("w");
        let empty = Style::new();
        let a = Style::new().with("color", "red");
        let b = Style::new().with("color", "blue");

        let mut sheet = StyleSheet::new();
        install(&mut sheet, &build_rules(&id, &styles(&empty, &a, &empty)));
        assert_eq!(sheet.rules_for(&id).len(), 2);

        install(&mut sheet, &build_rules(&id, &styles(&b, &empty, &empty)));
        let rules = sheet.rules_for(&id);
        assert_eq!(rules.len(), 1, "stale hover rule must not survive");
        assert_eq!(rules[0].style, b);

        remove(&mut sheet, &id);
        assert!(sheet.rules_for(&id).is_empty());
        assert!(sheet.is_empty());
    }

    #[test]
    fn install_leaves_other_ids_alone() {
        let one = StyleId::new("one");
        let two = StyleId::new("two");
        let empty = Style::new();
        let mut sheet = StyleSheet::new();
        let plain = styles(&empty, &empty, &empty);
        install(&mut sheet, &build_rules(&one, &plain));
        install(&mut sheet, &build_rules(&two, &plain));
        assert_eq!(sheet.len(), 2);

        remove(&mut sheet, &one);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules_for(&two).len(), 1);
    }

    #[test]
    fn install_groups_mixed_ids() {
        let one = StyleId::new("one");
        let two = StyleId::new("two");
        let empty = Style::new();
        let mut rules = build_rules(&one, &styles(&empty, &empty, &empty));
        rules.extend(build_rules(&two, &styles(&empty, &empty, &empty)));

        let mut sheet = StyleSheet::new();
        install(&mut sheet, &rules);
        assert_eq!(sheet.rules_for(&one).len(), 1);
        assert_eq!(sheet.rules_for(&two).len(), 1);
    }

    #[test]
    fn css_uses_disabled_selector_and_important() {
        let rule = StyleRule {
            target_id: StyleId::new("w"),
            pseudo_class: PseudoClass::Hover,
            style: Style::new().with("color", "gray").with("cursor", "default"),
            disabled: true,
        };
        let mut css = String::new();
        rule.write_css(&mut css);
        let expected = ".w[aria-disabled=\"true\"]:hover \
            {color: gray !important; cursor: default !important;}\n";
        assert_eq!(css, expected);
    }

    #[test]
    fn to_css_orders_by_id() {
        let empty = Style::new();
        let focus = Style::new().with("outline", "0");
        let mut sheet = StyleSheet::new();
        install(
            &mut sheet,
            &build_rules(&StyleId::new("b"), &styles(&focus, &empty, &empty)),
        );
        install(
            &mut sheet,
            &build_rules(&StyleId::new("a"), &styles(&focus, &empty, &empty)),
        );
        assert_eq!(
            sheet.to_css(),
            ".a:focus {outline: 0 !important;}\n.b:focus {outline: 0 !important;}\n"
        );
    }
}
