//! Numeric coercion for classified columns.
//!
//! Raw values arrive with formatting noise: thousands separators, internal
//! spaces, currency symbols, trailing percent signs. Cleaning strips that
//! noise so `"£1,000.50"` parses as `1000.5` and `"166,012,276"` as an
//! integer. A column classifies numeric only when at least the configured
//! fraction of its non-null candidates parse.

/// Remove formatting noise from a numeric-looking string.
///
/// Strips all whitespace (including non-breaking spaces) and comma
/// thousands separators, plus the currency symbols `£ $ €`.
fn clean_numeric(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(*c, ',' | '£' | '$' | '€'))
        .collect()
}

/// Parse one raw value as a number after cleaning.
///
/// A trailing `%` is stripped for the numeric-candidate pass. Non-finite
/// parses (`inf`, `NaN` spellings) are rejected so free-text tokens are not
/// absorbed as floats. Returns `None` when nothing numeric remains.
#[must_use]
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned = clean_numeric(value);
    let candidate = cleaned.strip_suffix('%').unwrap_or(&cleaned);
    if candidate.is_empty() {
        return None;
    }
    candidate.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Result of coercing one column's cells numerically.
#[derive(Debug)]
pub(crate) struct NumericColumn {
    /// True when every parsed value is integral (`value % 1 == 0`) and fits
    /// in `i64`.
    pub integral: bool,
    /// Parsed values aligned with the input cells; candidates that failed to
    /// parse are null.
    pub values: Vec<Option<f64>>,
    /// Non-null candidates that failed to parse and degraded to null.
    pub losses: usize,
}

/// Attempt numeric coercion of a column.
///
/// `cells` are the null-normalized values. Candidates that clean to an empty
/// string count as missing, not as parse failures. Returns `None` when fewer
/// than `threshold` of the candidates parse, so the caller can try the next
/// classifier.
pub(crate) fn coerce_numeric(cells: &[Option<String>], threshold: f64) -> Option<NumericColumn> {
    let mut values = Vec::with_capacity(cells.len());
    let mut candidates = 0usize;
    let mut successes = 0usize;
    let mut integral = true;

    for cell in cells {
        let parsed = match cell {
            Some(raw) => {
                let cleaned = clean_numeric(raw);
                let candidate = cleaned.strip_suffix('%').unwrap_or(&cleaned);
                if candidate.is_empty() {
                    None
                } else {
                    candidates += 1;
                    match candidate.parse::<f64>().ok().filter(|v| v.is_finite()) {
                        Some(v) => {
                            successes += 1;
                            if v.fract() != 0.0 || v < i64::MIN as f64 || v > i64::MAX as f64 {
                                integral = false;
                            }
                            Some(v)
                        }
                        None => None,
                    }
                }
            }
            None => None,
        };
        values.push(parsed);
    }

    if candidates == 0 {
        return None;
    }

    let fraction = successes as f64 / candidates as f64;
    if fraction < threshold {
        return None;
    }

    Some(NumericColumn {
        integral: integral && successes > 0,
        values,
        losses: candidates - successes,
    })
}
