//! Output file naming for tables derived from sheet names.

use tabcast_model::OutputNaming;
use uuid::Uuid;

/// Sanitize a sheet name so it is safe as a filename.
///
/// Path separators and whitespace become underscores; anything outside
/// alphanumerics, dash, underscore and dot is replaced. A name that
/// sanitizes to nothing falls back to `sheet`.
#[must_use]
pub fn safe_sheet_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.chars().all(|c| c == '_') {
        "sheet".to_string()
    } else {
        safe
    }
}

/// File stem for one output table under the given naming policy.
///
/// Anonymized naming draws a fresh opaque identifier per call, so it never
/// collides and never leaks the sheet name into public datasets.
#[must_use]
pub fn table_file_stem(sheet_name: &str, naming: OutputNaming) -> String {
    match naming {
        OutputNaming::HumanReadable => safe_sheet_name(sheet_name),
        OutputNaming::Anonymized => Uuid::new_v4().simple().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_name_replaces_separators() {
        assert_eq!(safe_sheet_name("Q1/Q2 Results"), "Q1_Q2_Results");
        assert_eq!(safe_sheet_name("a\\b"), "a_b");
        assert_eq!(safe_sheet_name("Sheet 1"), "Sheet_1");
    }

    #[test]
    fn test_safe_name_keeps_safe_chars() {
        assert_eq!(safe_sheet_name("data-2023.v1_final"), "data-2023.v1_final");
    }

    #[test]
    fn test_degenerate_name_falls_back() {
        assert_eq!(safe_sheet_name(""), "sheet");
        assert_eq!(safe_sheet_name("///"), "sheet");
        assert_eq!(safe_sheet_name("   "), "sheet");
    }

    #[test]
    fn test_anonymized_stems_are_unique_and_opaque() {
        let a = table_file_stem("Payroll", OutputNaming::Anonymized);
        let b = table_file_stem("Payroll", OutputNaming::Anonymized);
        assert_ne!(a, b);
        assert!(!a.to_lowercase().contains("payroll"));
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_human_readable_stem() {
        assert_eq!(
            table_file_stem("My Sheet", OutputNaming::HumanReadable),
            "My_Sheet"
        );
    }
}
