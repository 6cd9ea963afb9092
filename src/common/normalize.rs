//! Text canonicalization for comparisons.
//!
//! Every comparison the rule engine makes goes through one of these
//! functions. All of them are idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal prefix used to compare numeric application identifiers.
pub const APP_ID_PREFIX: &str = "appid-";

static PREFIXED_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+[-_ ]?(\d+)$").expect("valid prefixed id regex"));

/// Lowercase, collapse internal whitespace runs to one space, trim.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Section-name form: [`normalize`] after dropping every character that is
/// neither alphanumeric nor whitespace.
pub fn normalize_section(text: &str) -> String {
    // Filter after lowercasing; some lowercase expansions add combining marks
    let kept: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    normalize(&kept)
}

/// Key form: lowercase with all whitespace removed (`"Project ID"` → `"projectid"`).
pub fn normalize_key(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive comparison of trimmed values.
pub fn values_match(found: &str, expected: &str) -> bool {
    normalize(found) == normalize(expected)
}

/// Comparison for the Application ID field only.
///
/// Values that match case-insensitively are equal. Otherwise, when either
/// side is purely numeric, both sides are rewritten to `appid-<digits>`
/// (a side like `APP-45` contributes its digits) and compared again.
pub fn app_id_equivalent(found: &str, expected: &str) -> bool {
    if values_match(found, expected) {
        return true;
    }

    let found = normalize_key(found);
    let expected = normalize_key(expected);
    if !is_numeric(&found) && !is_numeric(&expected) {
        return false;
    }
    match (canonical_app_id(&found), canonical_app_id(&expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn canonical_app_id(value: &str) -> Option<String> {
    if is_numeric(value) {
        return Some(format!("{}{}", APP_ID_PREFIX, value));
    }
    PREFIXED_ID
        .captures(value)
        .map(|caps| format!("{}{}", APP_ID_PREFIX, &caps[1]))
}
