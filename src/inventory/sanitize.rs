//! Spreadsheet formula-injection defense
//!
//! Tag values and resource names are attacker-influenced: anyone who can tag
//! a resource controls text that ends up in report cells. A leading `=`, `+`,
//! `-` or `@` would make a spreadsheet application evaluate the cell as a
//! formula, so such values get a single-quote prefix, which spreadsheet
//! applications render as literal text. This is not an HTML/XSS defense; the
//! output is a workbook, not a web page.

/// Characters a spreadsheet application interprets as a formula trigger.
const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

/// Neutralize a cell value that would otherwise be evaluated as a formula.
///
/// Empty input stays empty; any other value starting with a trigger
/// character is returned with a `'` prefix, everything else unchanged.
pub fn sanitize(value: &str) -> String {
    match value.chars().next() {
        Some(first) if FORMULA_TRIGGERS.contains(&first) => format!("'{value}"),
        _ => value.to_string(),
    }
}
