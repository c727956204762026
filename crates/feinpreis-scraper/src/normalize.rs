//! Locale-aware numeric normalization for German/Austrian price text.
//!
//! Every extraction strategy funnels raw text through
//! [`parse_localized_price`]; a price in a report is always this function's
//! output, never unparsed page text.

use regex::Regex;

/// First run of digits with optional dot/space thousands groups and an
/// optional comma-or-dot decimal tail.
const NUMERIC_RUN: &str = r"\d+(?:[. ]\d{3})*(?:[.,]\d+)?";

/// Extract the first numeric run from locale-formatted text and parse it as
/// a price.
///
/// Assumes German/Austrian convention: `.` and spaces (including no-break
/// variants) group thousands, `,` is the decimal separator. Surrounding
/// currency symbols and trailing text are ignored.
///
/// Known limitation, kept on purpose: American-format input without
/// thousands grouping (`"1234.56"`) is misread — the dot is stripped as a
/// grouping character, yielding `123456`.
///
/// Returns `None` when no numeric run exists or the run does not parse to a
/// finite value.
#[must_use]
pub fn parse_localized_price(text: &str) -> Option<f64> {
    // No-break spaces show up as thousands separators on rendered pages.
    let despaced = text.replace(['\u{202f}', '\u{a0}'], " ");
    let collapsed = despaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let re = Regex::new(NUMERIC_RUN).expect("valid regex");
    let run = re.find(&collapsed)?.as_str();

    let normalized: String = run
        .chars()
        .filter(|c| *c != ' ' && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value = normalized.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}
