//! Raw JSON key → identifier.
//!
//! Identifiers only name the generated accessor. Runtime lookups always go
//! through the raw key (see [`crate::node::ConfigPath`]), so nothing here may
//! change which value an accessor reads.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Substituted when a key normalizes to nothing (`""`, `"--"`, `"$"`).
pub const PLACEHOLDER: &str = "Property";

/// Dotted vendor namespaces that split on `.` only, so inner `_`/`-` survive.
pub const VENDOR_PREFIXES: &[&str] = &["Microsoft.", "System."];

const DELIMITERS: &[char] = &['.', '-', '_', ' '];

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z]|_[0-9])[A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `[A-Za-z_][A-Za-z0-9_]*` with no `__`, no trailing `_`, and a leading
    /// `_` only in front of a digit.
    pub fn is_valid(s: &str) -> bool {
        IDENTIFIER_RE.is_match(s) && !s.contains("__") && !s.ends_with('_')
    }

    /// Same name with a numeric suffix, for same-level collisions.
    pub(crate) fn with_suffix(&self, n: usize) -> Self {
        Identifier(format!("{}{n}", self.0))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn normalize(raw_key: &str) -> Identifier {
    let joined = if VENDOR_PREFIXES.iter().any(|p| raw_key.starts_with(p)) {
        title_case_segments(raw_key.split('.'))
    } else if raw_key.contains(DELIMITERS) {
        title_case_segments(raw_key.split(DELIMITERS))
    } else {
        title_case_first(raw_key)
    };

    let mut out = String::with_capacity(joined.len() + 1);
    for c in joined.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    let trimmed = out.trim_matches('_');

    let ident = if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    };
    debug_assert!(Identifier::is_valid(&ident), "invalid identifier {ident:?} from {raw_key:?}");
    Identifier(ident)
}

/// True when the identifier cannot be mapped back to the raw key, so the
/// enclosing level needs a raw-key fallback accessor.
pub fn is_complex(raw_key: &str) -> bool {
    raw_key.is_empty() || raw_key.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
}

fn title_case_segments<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    segments
        .filter(|s| !s.is_empty())
        .map(title_case_first)
        .collect()
}

fn title_case_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        normalize(s).to_string()
    }

    #[test]
    fn plain_keys_only_get_first_letter_raised() {
        assert_eq!(norm("ConnectionStrings"), "ConnectionStrings");
        assert_eq!(norm("baseUrl"), "BaseUrl");
        assert_eq!(norm("x"), "X");
    }

    #[test]
    fn delimited_keys_are_title_cased_per_segment() {
        assert_eq!(norm("api-settings"), "ApiSettings");
        assert_eq!(norm("log level"), "LogLevel");
        assert_eq!(norm("snake_case_key"), "SnakeCaseKey");
        assert_eq!(norm("a..b--c"), "ABC");
        assert_eq!(norm("Serilog.MinimumLevel"), "SerilogMinimumLevel");
    }

    #[test]
    fn vendor_prefix_splits_on_dots_only() {
        assert_eq!(norm("Microsoft.AspNetCore"), "MicrosoftAspNetCore");
        assert_eq!(norm("Microsoft.Hosting.Lifetime"), "MicrosoftHostingLifetime");
        assert_eq!(norm("System.Net_http"), "SystemNet_http");
        assert_eq!(norm("Microsoft.Entity-Framework"), "MicrosoftEntity_Framework");
    }

    #[test]
    fn other_characters_become_single_underscores() {
        assert_eq!(norm("a:b"), "A_b");
        assert_eq!(norm("price($)"), "Price");
        assert_eq!(norm("a$$b"), "A_b");
        // title-casing runs before replacement, so a non-ASCII initial is lost
        assert_eq!(norm("ünïcode"), "n_code");
    }

    #[test]
    fn empty_results_use_placeholder() {
        assert_eq!(norm(""), PLACEHOLDER);
        assert_eq!(norm("--"), PLACEHOLDER);
        assert_eq!(norm("$"), PLACEHOLDER);
        assert_eq!(norm("_"), PLACEHOLDER);
    }

    #[test]
    fn digit_leading_keys_get_underscore_prefix() {
        assert_eq!(norm("123abc"), "_123abc");
        assert_eq!(norm("1"), "_1");
        // trimming happens first, then the prefix
        assert_eq!(norm("$9lives"), "_9lives");
    }

    #[test]
    fn every_normalized_key_is_valid() {
        let keys = [
            "", "_", "__x__", "a b", "1-2-3", "Microsoft.", "ÄÖÜ", "x:y:z", "a__b", "-lead",
            "trail-", "$weird$key$", "9", "Ok", "tab\tkey", "new\nline",
        ];
        for key in keys {
            let ident = normalize(key);
            assert!(Identifier::is_valid(ident.as_str()), "{key:?} -> {ident}");
        }
    }

    #[test]
    fn validity_rules() {
        assert!(Identifier::is_valid("ApiSettings"));
        assert!(Identifier::is_valid("_123abc"));
        assert!(Identifier::is_valid("A_b"));
        assert!(!Identifier::is_valid(""));
        assert!(!Identifier::is_valid("_abc"));
        assert!(!Identifier::is_valid("a__b"));
        assert!(!Identifier::is_valid("ab_"));
        assert!(!Identifier::is_valid("1ab"));
        assert!(!Identifier::is_valid("a-b"));
    }

    #[test]
    fn complex_keys_are_the_lossy_ones() {
        assert!(is_complex("Microsoft.AspNetCore"));
        assert!(is_complex("api-settings"));
        assert!(is_complex("log level"));
        assert!(is_complex("a:b"));
        assert!(is_complex("ünïcode"));
        assert!(is_complex(""));
        assert!(!is_complex("ApiSettings"));
        assert!(!is_complex("snake_case"));
        assert!(!is_complex("123abc"));
    }
}
