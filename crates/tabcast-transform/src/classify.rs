//! Per-column type classification.
//!
//! Strict order per column: all-null short-circuit, then the date check
//! (with its time-only veto), then the numeric check, then the Text
//! fallback. Exactly one classification wins; a column is never both
//! numeric and date-like.

use tabcast_model::{ColumnClassification, ColumnValues, ConvertOptions, TypedColumn};

use crate::datetime::coerce_datetime;
use crate::nulls::normalize_null;
use crate::numeric::coerce_numeric;

/// Classify one raw column and convert its cells to typed, nullable values.
///
/// Individual cells that fail to parse under the winning classification
/// degrade to null and are counted in `coercion_losses`; they never abort
/// the column.
#[must_use]
pub fn classify_column(name: &str, raw: &[String], options: &ConvertOptions) -> TypedColumn {
    let normalized: Vec<Option<String>> = raw
        .iter()
        .map(|cell| normalize_null(cell, options).map(str::to_string))
        .collect();

    let non_null = normalized.iter().flatten().count();
    if non_null == 0 {
        // Entirely null: no evidence to classify on, emit all-null Text
        return TypedColumn {
            name: name.to_string(),
            classification: ColumnClassification::Text,
            values: ColumnValues::Text(vec![None; raw.len()]),
            coercion_losses: 0,
        };
    }

    if let Some(dates) = coerce_datetime(
        &normalized,
        options.time_only_threshold,
        options.date_threshold,
    ) {
        let classification = ColumnClassification::DateTime {
            has_time: dates.has_time,
        };
        tracing::debug!(column = name, ?classification, losses = dates.losses, "classified");
        return TypedColumn {
            name: name.to_string(),
            classification,
            values: ColumnValues::DateTime(dates.values),
            coercion_losses: dates.losses,
        };
    }

    if let Some(numbers) = coerce_numeric(&normalized, options.numeric_threshold) {
        let (classification, values) = if numbers.integral {
            (
                ColumnClassification::Integer,
                ColumnValues::Integer(
                    numbers
                        .values
                        .iter()
                        .map(|v| v.map(|f| f as i64))
                        .collect(),
                ),
            )
        } else {
            (
                ColumnClassification::Float,
                ColumnValues::Float(numbers.values),
            )
        };
        tracing::debug!(column = name, ?classification, losses = numbers.losses, "classified");
        return TypedColumn {
            name: name.to_string(),
            classification,
            values,
            coercion_losses: numbers.losses,
        };
    }

    tracing::debug!(column = name, "classified as text");
    TypedColumn {
        name: name.to_string(),
        classification: ColumnClassification::Text,
        values: ColumnValues::Text(normalized),
        coercion_losses: 0,
    }
}
