/// Canonical form used for every output comparison.
///
/// Trims the whole text, then right-trims each line. Internal blank lines and
/// leading indentation survive.
///
/// ```
/// use pycoach_core::checker::normalize_output;
///
/// assert_eq!(normalize_output("a  \nb  "), "a\nb");
/// assert_eq!(normalize_output("a\n\nb"), "a\n\nb");
/// ```
pub fn normalize_output(output: &str) -> String {
    output
        .trim_matches(is_blank)
        .split('\n')
        .map(|line| line.trim_end_matches(is_blank))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`, which
/// `char::is_whitespace` leaves alone but Python's `str.strip` removes.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Explains how two normalized outputs differ.
pub fn diff_hint(user_output: &str, expected_output: &str) -> String {
    let user_lines: Vec<_> = user_output.split('\n').collect();
    let expected_lines: Vec<_> = expected_output.split('\n').collect();

    if user_lines.len() != expected_lines.len() {
        return format!(
            "Your output has {} line(s), but expected {} line(s).",
            user_lines.len(),
            expected_lines.len()
        );
    }

    for (i, (user_line, expected_line)) in user_lines.iter().zip(&expected_lines).enumerate() {
        if user_line != expected_line {
            return format!(
                "Line {} differs. Got '{}', expected '{}'.",
                i + 1,
                user_line,
                expected_line
            );
        }
    }

    "Check for extra whitespace or formatting differences.".to_owned()
}
