//! JSON extraction from free-form answers.

/// Locate a JSON object in a model answer.
///
/// Prefers a ```` ```json ```` fenced block in any letter case, else the
/// span from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Option<&str> {
    const FENCE: &str = "```json";
    if let Some(start) = text.to_ascii_lowercase().find(FENCE) {
        let body = &text[start + FENCE.len()..];
        let end = body.find("```").unwrap_or(body.len());
        return Some(body[..end].trim());
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Remove `//` line comments that sit outside string literals.
pub fn strip_comments(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
