// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rating values and preview values.

use crate::error::RatingError;

/// Number of selectable segments (stars) in a rating.
pub const SEGMENT_COUNT: u8 = 5;

/// A committed score in `1..=5`.
///
/// "Unset" is modeled as `Option<RatingValue>::None` at every use site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct RatingValue(u8);

impl RatingValue {
    /// The lowest score.
    pub const MIN: Self = Self(1);
    /// The highest score.
    pub const MAX: Self = Self(SEGMENT_COUNT);
    /// Every value, one per segment, in ascending order.
    pub const ALL: [Self; SEGMENT_COUNT as usize] = [Self(1), Self(2), Self(3), Self(4), Self(5)];

    /// Create a value, treating anything outside `1..=5` as unset.
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= 1 && raw <= SEGMENT_COUNT {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// The score as a plain integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = RatingError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(RatingError::OutOfRange(raw))
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

/// A transient preview ("focused value").
///
/// `Empty` is reachable only by decrementing below 1 from the keyboard (or by
/// dragging a touch left of the wrapper). It renders zero stars and is distinct
/// from having no preview at all, which is `Option<Preview>::None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preview {
    /// Preview zero highlighted segments.
    Empty,
    /// Preview this many highlighted segments.
    Value(RatingValue),
}

impl Preview {
    /// Build a preview from a star count, clamping into `0..=5`.
    #[must_use]
    pub fn from_stars(stars: u8) -> Self {
        match RatingValue::new(stars.min(SEGMENT_COUNT)) {
            Some(v) => Self::Value(v),
            None => Self::Empty,
        }
    }

    /// Number of highlighted segments this preview shows.
    #[must_use]
    pub const fn stars(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Value(v) => v.get(),
        }
    }

    /// The value a confirm would commit: `Empty` commits unset.
    #[must_use]
    pub const fn committed(self) -> Option<RatingValue> {
        match self {
            Self::Empty => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl From<RatingValue> for Preview {
    fn from(value: RatingValue) -> Self {
        Self::Value(value)
    }
}
