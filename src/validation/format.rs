//! Offline format checks against the UK postcode grammar.

use std::sync::LazyLock;

use regex::Regex;

/// Full postcode: outward code, optional single space, inward code.
const POSTCODE_PATTERN: &str = r"(?i)^(GIR ?0AA|[A-PR-UWYZ]([0-9]{1,2}|[A-HK-Y][0-9]([0-9ABEHMNPRV-Y])?|[0-9][A-HJKPS-UW]) ?[0-9][ABD-HJLNP-UW-Z]{2})$";

/// Outward code only (area and district).
const OUTCODE_PATTERN: &str =
    r"(?i)^(GIR|[A-PR-UWYZ]([0-9]{1,2}|[A-HK-Y][0-9]([0-9ABEHMNPRV-Y])?|[0-9][A-HJKPS-UW]))$";

/// Length of the inward code (sector digit plus two unit letters).
const INWARD_CODE_LEN: usize = 3;

static POSTCODE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(POSTCODE_PATTERN).ok());

static OUTCODE_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(OUTCODE_PATTERN).ok());

fn matches(regex: &LazyLock<Option<Regex>>, value: &str) -> bool {
    regex
        .as_ref()
        .is_some_and(|regex| regex.is_match(value.trim()))
}

/// Returns true if `postcode` is shaped like a UK postcode.
///
/// Case-insensitive; surrounding whitespace is ignored and at most one space
/// may separate the outward and inward codes.
///
/// # Examples
///
/// ```
/// use postcodes_io::validation::is_valid_postcode_format;
///
/// assert!(is_valid_postcode_format("N11 1QZ"));
/// assert!(is_valid_postcode_format("ex165bl"));
/// assert!(!is_valid_postcode_format("N11 1QZZ"));
/// ```
#[must_use]
pub fn is_valid_postcode_format(postcode: &str) -> bool {
    matches(&POSTCODE_REGEX, postcode)
}

/// Returns true if `outcode` is shaped like a UK outward code (e.g. `N11`, `EC1A`).
#[must_use]
pub fn is_valid_outcode_format(outcode: &str) -> bool {
    matches(&OUTCODE_REGEX, outcode)
}

/// Canonical form of a postcode: upper case, one space before the inward code.
///
/// Internal whitespace is dropped before checking, so `"ex16  5bl"` becomes
/// `"EX16 5BL"`. Returns `None` if the result is not a valid postcode format.
#[must_use]
pub fn normalize_postcode(postcode: &str) -> Option<String> {
    let compact: String = postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !is_valid_postcode_format(&compact) {
        return None;
    }

    // The pattern only admits ASCII, so byte indexing is on a char boundary.
    let (outward, inward) = compact.split_at(compact.len() - INWARD_CODE_LEN);
    Some(format!("{outward} {inward}"))
}
