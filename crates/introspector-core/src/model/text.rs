//! Text normalisation shared by all element kinds.

/// Normalises a multi-line description block.
///
/// Every line is trimmed, blank lines are dropped and the remaining lines are
/// joined with `\n`. Returns `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use introspector_core::model::normalize_block;
///
/// assert_eq!(normalize_block("\n  first \n\n  second\n").as_deref(), Some("first\nsecond"));
/// assert_eq!(normalize_block("  \n "), None);
/// ```
pub fn normalize_block(text: &str) -> Option<String> {
    join_lines(text, "\n")
}

/// Normalises a message label into a single output line.
///
/// Lines are trimmed and blank lines dropped like [`normalize_block`], but
/// the lines are joined with the two-character PlantUML line break `\n` so
/// the label never spans more than one line of diagram text.
///
/// # Examples
///
/// ```
/// use introspector_core::model::normalize_label;
///
/// assert_eq!(normalize_label("call\n  service\n three").as_deref(), Some(r"call\nservice\nthree"));
/// ```
pub fn normalize_label(text: &str) -> Option<String> {
    join_lines(text, "\\n")
}

fn join_lines(text: &str, separator: &str) -> Option<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(separator))
    }
}
