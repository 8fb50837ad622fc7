// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for the rating crate.

use thiserror::Error;

/// Errors reported by the rating widget.
///
/// Configuration input is never rejected with one of these; out-of-range values
/// degrade to "unset" instead. Errors are reserved for explicit conversions and
/// lifecycle misuse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RatingError {
    /// A score outside `1..=5` was passed to a checked conversion.
    #[error("rating {0} is outside the range 1..=5")]
    OutOfRange(u8),
    /// The widget was unmounted without holding style identifiers.
    #[error("rating widget is not mounted")]
    NotMounted,
}
