//! DOI grammar, token matching, and normalization.
//!
//! The grammar is a single pattern applied to one delimiter-free token:
//!
//! ```text
//! doi     = [ scheme ] "10." registrant "/" suffix
//! scheme  = "https://doi.org/" | "http://doi.org/"
//!         | "https://dx.doi.org/" | "http://dx.doi.org/"
//!         | "doi:"                          ; all case-insensitive
//! registrant = 4*9 DIGIT
//! suffix  = 1*( ALPHA | DIGIT | "-" | "_" | "." | ";" | "(" | ")" | "/" | ":" | "%" )
//! ```
//!
//! The suffix is the longest run of allowed characters after the `/`.
//! `%` is part of the run only so that escapes can be decoded afterwards.
//! A decoded suffix must stay inside the suffix class minus `%` and `;`
//! (the latter is a token delimiter); anything else drops the token.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::error::ParseError;

/// The DOI grammar. `scheme` is the optional prefix, `doi` the identifier proper.
/// Preceding-character rejection is done in code since the `regex` crate
/// doesn't support lookbehind.
#[allow(clippy::expect_used)]
static DOI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<scheme>(?i:https?://(?:dx\.)?doi\.org/|doi:))?(?P<doi>10\.[0-9]{4,9}/[-_.;()/:a-zA-Z0-9%]+)",
    )
    .expect("DOI regex is valid") // Static pattern, safe to panic
});

/// A grammar match inside a single token, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoiMatch<'a> {
    /// Full matched text including any scheme prefix
    pub raw: &'a str,
    /// Scheme prefix, when present
    pub scheme: Option<&'a str>,
    /// Identifier text after the scheme, still percent-encoded
    pub encoded: &'a str,
}

/// Finds the first DOI in `token`.
///
/// A bare DOI directly preceded by a letter, digit, or `.` is not a match,
/// which rejects version strings (`v10.1234/rc1`) and IP-like runs
/// (`192.10.1234/24`).
#[must_use]
pub fn match_token(token: &str) -> Option<DoiMatch<'_>> {
    for caps in DOI_PATTERN.captures_iter(token) {
        let (Some(full), Some(doi)) = (caps.get(0), caps.name("doi")) else {
            continue;
        };
        let scheme = caps.name("scheme").map(|m| m.as_str());

        if scheme.is_none() && doi.start() > 0 {
            let prev_byte = token.as_bytes()[doi.start() - 1];
            if prev_byte.is_ascii_alphanumeric() || prev_byte == b'.' {
                trace!(token, "DOI candidate glued to preceding text; skipping");
                continue;
            }
        }

        return Some(DoiMatch {
            raw: full.as_str(),
            scheme,
            encoded: doi.as_str(),
        });
    }
    None
}

/// Turns a match into a canonical identifier: scheme dropped, escapes decoded.
///
/// # Errors
///
/// Returns [`ParseError::MalformedEncoding`] when the identifier carries a
/// broken percent escape or decodes to a character outside the suffix class.
pub fn normalize(found: &DoiMatch<'_>) -> Result<String, ParseError> {
    let decoded = percent_decode(found.encoded)?;
    if let Some(ch) = decoded.chars().find(|&ch| !is_decoded_suffix_char(ch)) {
        return Err(ParseError::decodes_outside_grammar(found.encoded, ch));
    }
    Ok(decoded)
}

/// Characters a normalized identifier may contain. The `10.` prefix and
/// registrant digits fall inside this set too.
fn is_decoded_suffix_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '(' | ')' | '/' | ':')
}

fn percent_decode(encoded: &str) -> Result<String, ParseError> {
    if !encoded.contains('%') {
        return Ok(encoded.to_string());
    }

    // urlencoding passes stray '%' through untouched, so escapes are checked first.
    let bytes = encoded.as_bytes();
    let mut cursor = 0;
    while let Some(offset) = encoded[cursor..].find('%') {
        let position = cursor + offset;
        match bytes.get(position + 1..position + 3) {
            Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => cursor = position + 3,
            _ => return Err(ParseError::bad_escape(encoded, position)),
        }
    }

    urlencoding::decode(encoded)
        .map(Cow::into_owned)
        .map_err(|_| ParseError::not_utf8(encoded))
}
