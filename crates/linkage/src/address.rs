//! Address normalization.
//!
//! Produces a canonical, comparable key from a free-form street address:
//! uppercase, punctuation-free, street suffixes abbreviated, and any unit
//! designator moved to a trailing `UNIT <value>` token. The key is a matching
//! aid only and is never written to output.

use std::sync::OnceLock;

use regex::Regex;

/// Street suffix dictionary: full word → standard abbreviation.
/// Abbreviated forms map to themselves.
pub const SUFFIXES: &[(&str, &str)] = &[
    ("STREET", "ST"),
    ("ST", "ST"),
    ("ROAD", "RD"),
    ("RD", "RD"),
    ("AVENUE", "AVE"),
    ("AVE", "AVE"),
    ("BOULEVARD", "BLVD"),
    ("BLVD", "BLVD"),
    ("DRIVE", "DR"),
    ("DR", "DR"),
    ("LANE", "LN"),
    ("LN", "LN"),
    ("COURT", "CT"),
    ("CT", "CT"),
    ("PLACE", "PL"),
    ("PL", "PL"),
    ("TERRACE", "TER"),
    ("TER", "TER"),
    ("CIRCLE", "CIR"),
    ("CIR", "CIR"),
];

/// Unit designator: a keyword followed by whitespace and a value token
/// (`APT 4B`, `SUITE 200`, `STE B-2`), or glued to a value that starts with a
/// digit (`APT4B`). Punctuation between keyword and value (`APT. 3`) is not a
/// separator, and a keyword glued to letters (`STEWART`, `UNITED`) is not a
/// designator.
fn unit_pattern() -> &'static Regex {
    static UNIT_RE: OnceLock<Regex> = OnceLock::new();
    UNIT_RE.get_or_init(|| {
        Regex::new(r"\b(?:APT|UNIT|STE|SUITE)(?:\s+([A-Z0-9-]+)|([0-9][A-Z0-9-]*))\b")
            .expect("unit designator pattern is valid")
    })
}

/// Abbreviate a street suffix token, or return it unchanged.
pub fn standard_suffix(token: &str) -> &str {
    SUFFIXES
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, abbr)| *abbr)
        .unwrap_or(token)
}

/// Canonicalize a raw address into its comparable form.
///
/// Returns an empty string when nothing but punctuation remains; callers
/// must not use an empty result as an index key.
pub fn normalize_address(raw: &str) -> String {
    let working = raw.to_uppercase().trim().replace('#', " UNIT ");

    let pattern = unit_pattern();
    let unit: String = pattern
        .captures(&working)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().chars().filter(|c| c.is_ascii_alphanumeric()).collect())
        .unwrap_or_default();
    let working = pattern.replace_all(&working, "");

    let cleaned: String = working
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut parts: Vec<&str> = cleaned.split_whitespace().map(standard_suffix).collect();
    if parts.is_empty() {
        return String::new();
    }
    if !unit.is_empty() {
        parts.push("UNIT");
        parts.push(&unit);
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_suffix() {
        assert_eq!(normalize_address("123 Main Street"), "123 MAIN ST");
        assert_eq!(normalize_address("  9 ocean   boulevard "), "9 OCEAN BLVD");
        assert_eq!(normalize_address("42 Oak Terrace"), "42 OAK TER");
    }

    #[test]
    fn abbreviated_forms_are_stable() {
        assert_eq!(normalize_address("123 MAIN ST"), "123 MAIN ST");
        assert_eq!(normalize_address("7 Elm Ave."), "7 ELM AVE");
    }

    #[test]
    fn hash_becomes_unit() {
        assert_eq!(normalize_address("500 Brickell Ave #1203"), "500 BRICKELL AVE UNIT 1203");
        assert_eq!(normalize_address("9 Palm Ct, #3-A"), "9 PALM CT UNIT 3A");
    }

    #[test]
    fn stacked_designator_captures_following_keyword() {
        // `APT #1203` reads as `APT UNIT 1203`: APT takes UNIT as its value.
        assert_eq!(
            normalize_address("500 Brickell Ave Apt #1203"),
            "500 BRICKELL AVE 1203 UNIT UNIT"
        );
    }

    #[test]
    fn designators_move_to_end() {
        assert_eq!(normalize_address("Apt 4 10 Pine Lane"), "10 PINE LN UNIT 4");
        assert_eq!(normalize_address("10 Pine Lane Suite 200"), "10 PINE LN UNIT 200");
        assert_eq!(normalize_address("10 Pine Lane STE B-2"), "10 PINE LN UNIT B2");
        assert_eq!(normalize_address("10 Pine Lane apt7"), "10 PINE LN UNIT 7");
        assert_eq!(normalize_address("8 Coral Way Apt 3"), "8 CORAL WAY UNIT 3");
    }

    #[test]
    fn punctuated_keyword_is_not_a_designator() {
        assert_eq!(normalize_address("8 Coral Way, Apt. 3"), "8 CORAL WAY APT 3");
        assert_ne!(
            normalize_address("8 Coral Way, Apt. 3"),
            normalize_address("8 Coral Way Apt 3")
        );
    }

    #[test]
    fn keyword_prefix_is_not_a_designator() {
        assert_eq!(normalize_address("12 Stewart Street"), "12 STEWART ST");
        assert_eq!(normalize_address("3 United Court"), "3 UNITED CT");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(normalize_address(""), "");
        assert_eq!(normalize_address("  ,.;-- "), "");
        assert_eq!(normalize_address("&*!"), "");
    }

    #[test]
    fn unit_without_street_is_empty() {
        assert_eq!(normalize_address("Apt 5"), "");
    }

    #[test]
    fn punctuation_splits_tokens() {
        assert_eq!(normalize_address("1200 N.W. 7th St."), "1200 N W 7TH ST");
    }

    #[test]
    fn idempotent_on_canonical() {
        for raw in [
            "123 Main Street",
            "500 Brickell Ave #1203",
            "10 Pine Lane STE B-2",
            "8 Coral Way Apt 3",
        ] {
            let once = normalize_address(raw);
            assert_eq!(normalize_address(&once), once, "raw = {raw:?}");
        }
    }
}
