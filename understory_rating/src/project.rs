// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render projection: state and configuration to visual output.
//!
//! [`project`] is a pure function. It decides which segments are highlighted,
//! which style variant each uses, the wrapper style and class names, and the ARIA
//! attributes. It does not build markup; the host turns a [`RenderOutput`] into
//! whatever view tree it uses.

use alloc::string::String;

use crate::config::{Attributes, Configuration};
use crate::inject::StyleIds;
use crate::state::WidgetState;
use crate::style::Style;
use crate::value::{RatingValue, SEGMENT_COUNT};

bitflags::bitflags! {
    /// Summary of the visual state, for hosts that style by flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct VisualState: u8 {
        /// Interaction is disabled.
        const DISABLED         = 0b0000_0001;
        /// A pointer or touch is pressed.
        const ACTIVE           = 0b0000_0010;
        /// Focus arrived from the keyboard.
        const KEYBOARD_FOCUSED = 0b0000_0100;
        /// A preview is shown instead of the committed value.
        const PREVIEWING       = 0b0000_1000;
    }
}

/// Which style a segment uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentVariant {
    /// Above the effective value.
    Default,
    /// At or below the effective value.
    Highlighted,
    /// Highlighted while pressed.
    Pressed,
    /// Above the effective value, disabled.
    DisabledDefault,
    /// At or below the effective value, disabled.
    DisabledHighlighted,
}

impl SegmentVariant {
    /// Whether the segment counts toward the shown rating.
    #[must_use]
    pub const fn is_highlighted(self) -> bool {
        matches!(
            self,
            Self::Highlighted | Self::Pressed | Self::DisabledHighlighted
        )
    }
}

/// One rendered segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentView {
    /// The value clicking this segment commits.
    pub value: RatingValue,
    /// The style variant in effect.
    pub variant: SegmentVariant,
    /// Resolved inline style.
    pub style: Style,
    /// Class names (user class plus the scoped segment id).
    pub class_name: String,
    /// The glyph to draw.
    pub character: char,
}

/// The rendered wrapper element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapperView {
    /// Resolved inline style.
    pub style: Style,
    /// Whether the inline keyboard-focus overlay is part of `style`.
    pub focus_overlay: bool,
    /// Class names (user class plus the scoped wrapper id).
    pub class_name: String,
    /// Tab index to render.
    pub tab_index: i32,
    /// Visual state flags.
    pub state: VisualState,
    /// Sanitized passthrough attributes.
    pub attributes: Attributes,
}

/// ARIA attributes of the wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AriaAttributes {
    /// `aria-valuemin`
    pub value_min: u8,
    /// `aria-valuemax`
    pub value_max: u8,
    /// `aria-valuenow`; absent while unset.
    pub value_now: Option<u8>,
    /// `aria-disabled`
    pub disabled: bool,
    /// `aria-label`
    pub label: Option<String>,
}

/// Everything the host needs to draw the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    /// The five segments, lowest value first.
    pub segments: [SegmentView; SEGMENT_COUNT as usize],
    /// The wrapper.
    pub wrapper: WrapperView,
    /// ARIA attributes for the wrapper.
    pub aria: AriaAttributes,
}

impl RenderOutput {
    /// Number of highlighted segments.
    #[must_use]
    pub fn highlighted_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.variant.is_highlighted())
            .count()
    }
}

/// Join two optional class names with a space.
#[must_use]
pub fn union_class_names(first: Option<&str>, second: Option<&str>) -> String {
    match (first, second) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
            let mut out = String::with_capacity(a.len() + b.len() + 1);
            out.push_str(a);
            out.push(' ');
            out.push_str(b);
            out
        }
        (Some(a), _) if !a.is_empty() => a.into(),
        (_, Some(b)) => b.into(),
        _ => String::new(),
    }
}

/// Project `state` under `config` to visual output.
///
/// `ids` is `None` before mount; class names then carry only the user classes.
/// `attributes` are the already sanitized passthrough attributes.
#[must_use]
pub fn project(
    state: &WidgetState,
    config: &Configuration,
    ids: Option<&StyleIds>,
    attributes: &Attributes,
) -> RenderOutput {
    let styles = config.merged_styles();
    let effective = state.effective_stars();

    let segment_class = union_class_names(
        config.class_name.as_deref(),
        ids.map(|ids| ids.segment.as_str()),
    );
    let segments = RatingValue::ALL.map(|value| {
        let highlighted = effective >= value.get();
        let (variant, style) = match (config.disabled, highlighted, state.is_active()) {
            (true, true, _) => (
                SegmentVariant::DisabledHighlighted,
                styles.base.merged(&styles.disabled_highlighted),
            ),
            (true, false, _) => (
                SegmentVariant::DisabledDefault,
                styles.base.merged(&styles.disabled_default),
            ),
            (false, true, true) => (
                SegmentVariant::Pressed,
                styles
                    .base
                    .merged(&styles.highlighted)
                    .merged(&styles.active),
            ),
            (false, true, false) => (
                SegmentVariant::Highlighted,
                styles.base.merged(&styles.highlighted),
            ),
            (false, false, _) => (
                SegmentVariant::Default,
                styles.base.merged(&styles.default),
            ),
        };
        SegmentView {
            value,
            variant,
            style,
            class_name: segment_class.clone(),
            character: config.rating_character,
        }
    });

    // The overlay complements the injected `:focus` rule: it is drawn only while that
    // rule is neutralized, never on top of a rule that already carries the focus style.
    let focus_overlay =
        state.is_keyboard_focused() && config.prevent_focus_style_for_touch_and_click;
    let mut wrapper_style = styles.wrapper.clone();
    if focus_overlay {
        wrapper_style.extend(&styles.focus);
    }

    let mut flags = VisualState::empty();
    flags.set(VisualState::DISABLED, config.disabled);
    flags.set(VisualState::ACTIVE, state.is_active());
    flags.set(VisualState::KEYBOARD_FOCUSED, state.is_keyboard_focused());
    flags.set(VisualState::PREVIEWING, state.focused_value().is_some());

    RenderOutput {
        segments,
        wrapper: WrapperView {
            style: wrapper_style,
            focus_overlay,
            class_name: union_class_names(
                config.wrapper_class_name.as_deref(),
                ids.map(|ids| ids.wrapper.as_str()),
            ),
            tab_index: config.resolved_tab_index(),
            state: flags,
            attributes: attributes.clone(),
        },
        aria: AriaAttributes {
            value_min: RatingValue::MIN.get(),
            value_max: RatingValue::MAX.get(),
            value_now: state.value().map(RatingValue::get),
            disabled: config.disabled,
            label: config.aria_label.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::InstanceId;
    use crate::state::{Intent, Mode};
    use crate::style::StyleSet;
    use crate::value::Preview;

    fn rv(n: u8) -> RatingValue {
        RatingValue::new(n).unwrap()
    }

    fn render(state: &WidgetState, config: &Configuration) -> RenderOutput {
        project(state, config, None, &Attributes::new())
    }

    fn variants(out: &RenderOutput) -> [SegmentVariant; 5] {
        out.segments.each_ref().map(|s| s.variant)
    }

    #[test]
    fn value_highlights_that_many_segments() {
        let config = Configuration::new();
        for v in RatingValue::ALL {
            let out = render(&WidgetState::new(Some(v)), &config);
            assert_eq!(out.highlighted_count(), usize::from(v.get()));
            assert!(
                out.segments
                    .iter()
                    .all(|s| s.variant != SegmentVariant::Pressed),
                "not pressed, so no pressed variant"
            );
        }
        let unset = render(&WidgetState::default(), &config);
        assert_eq!(unset.highlighted_count(), 0);
    }

    #[test]
    fn pressed_variant_while_active() {
        let mut state = WidgetState::new(Some(rv(2)));
        state.apply(Intent::Activate, Mode::default());
        let out = render(&state, &Configuration::new());
        use SegmentVariant as V;
        assert_eq!(
            variants(&out),
            [V::Pressed, V::Pressed, V::Default, V::Default, V::Default]
        );
        let theme = StyleSet::builtin();
        let color = out.segments[0].style.get("color");
        assert_eq!(color, theme.active.get("color"));
        assert!(out.wrapper.state.contains(VisualState::ACTIVE));
    }

    #[test]
    fn disabled_uses_disabled_pair_even_while_active() {
        let mut state = WidgetState::new(Some(rv(3)));
        state.apply(Intent::Activate, Mode::default());
        let out = render(&state, &Configuration::new().with_disabled(true));
        use SegmentVariant as V;
        assert_eq!(
            variants(&out),
            [
                V::DisabledHighlighted,
                V::DisabledHighlighted,
                V::DisabledHighlighted,
                V::DisabledDefault,
                V::DisabledDefault
            ]
        );
        assert!(out.aria.disabled);
        assert_eq!(out.wrapper.tab_index, -1);
    }

    #[test]
    fn empty_preview_shows_zero_segments() {
        let mut state = WidgetState::new(Some(rv(4)));
        state.apply(Intent::Preview(Preview::Empty), Mode::default());
        let out = render(&state, &Configuration::new());
        assert_eq!(out.highlighted_count(), 0);
        assert!(out.wrapper.state.contains(VisualState::PREVIEWING));
        // aria-valuenow reports the committed value, not the preview.
        assert_eq!(out.aria.value_now, Some(4));
    }

    #[test]
    fn aria_range_and_unset_value() {
        let out = render(&WidgetState::default(), &Configuration::new());
        assert_eq!((out.aria.value_min, out.aria.value_max), (1, 5));
        assert_eq!(out.aria.value_now, None);
        assert_eq!(out.aria.label.as_deref(), Some("rating"));
    }

    #[test]
    fn focus_overlay_only_for_keyboard_focus_with_suppressed_rule() {
        let mut focused = WidgetState::default();
        focused.apply(Intent::Focus, Mode::default());
        let theme = StyleSet::builtin();

        let out = render(&focused, &Configuration::new());
        assert!(out.wrapper.focus_overlay);
        assert_eq!(
            out.wrapper.style.get("box-shadow"),
            theme.focus.get("box-shadow")
        );

        // The injected rule already carries the full focus style.
        let full_rule = Configuration::new().with_prevent_focus_style(false);
        let out = render(&focused, &full_rule);
        assert!(!out.wrapper.focus_overlay);
        assert_eq!(out.wrapper.style, theme.wrapper);

        let out = render(&WidgetState::default(), &Configuration::new());
        assert!(!out.wrapper.focus_overlay);
    }

    #[test]
    fn class_names_include_scoped_ids() {
        let ids = StyleIds::for_instance(InstanceId(7));
        let mut config = Configuration::new();
        config.class_name = Some("star".into());
        let state = WidgetState::default();
        let out = project(&state, &config, Some(&ids), &Attributes::new());
        assert_eq!(out.segments[0].class_name, "star rating-style-id-7");
        assert_eq!(out.wrapper.class_name, "rating-wrapper-style-id-7");
        assert_eq!(out.segments[4].character, '\u{2605}');
    }

    #[test]
    fn union_skips_missing_and_empty() {
        assert_eq!(union_class_names(None, None), "");
        assert_eq!(union_class_names(Some("a"), None), "a");
        assert_eq!(union_class_names(Some(""), Some("b")), "b");
        assert_eq!(union_class_names(Some("a"), Some("b")), "a b");
    }
}
