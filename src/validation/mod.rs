//! Postcode validation.
//!
//! Two layers, used together or apart:
//!
//! - **Format checks** ([`is_valid_postcode_format`], [`is_valid_outcode_format`],
//!   [`normalize_postcode`]): pure regex matching against the UK postcode
//!   grammar, no network. A passing format says nothing about existence.
//! - **Rules** ([`ValidationRule`]): the predicate shape a form or request
//!   validator expects. [`PostcodeRule`] asks the API whether the postcode
//!   exists; [`PostcodeFormatRule`] only checks the format.

mod format;
mod rule;

#[cfg(test)]
mod rule_tests;

pub use format::{is_valid_outcode_format, is_valid_postcode_format, normalize_postcode};
pub use rule::{POSTCODE_INVALID_MESSAGE, PostcodeFormatRule, PostcodeRule, ValidationRule};
