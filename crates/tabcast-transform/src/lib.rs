//! Column type classification and table materialization.
//!
//! This crate is the inference core of tabcast: it turns columns of raw
//! source strings into typed, nullable columns using heuristic but
//! deterministic rules.
//!
//! Per column, in strict order:
//!
//! 1. all-null short-circuit (emitted as all-null Text)
//! 2. time-only veto, then date classification with ISO 8601 UTC
//!    canonicalization
//! 3. numeric classification (Integer vs Float)
//! 4. Text fallback (trimmed, null-token normalized)
//!
//! Classification reads only the column's own cells and the immutable
//! [`ConvertOptions`](tabcast_model::ConvertOptions); columns of one table
//! may safely be classified concurrently by a caller that wants to.

mod classify;
mod datetime;
mod materialize;
mod nulls;
mod numeric;

pub use classify::classify_column;
pub use datetime::{format_iso8601_utc, is_time_only, parse_datetime_utc};
pub use materialize::materialize;
pub use nulls::normalize_null;
pub use numeric::parse_numeric;
