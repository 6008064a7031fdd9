//! Whitespace normalization for templates.

/// Remove the common leading indentation from every line.
///
/// Lines made only of spaces and tabs become empty and do not take part in
/// computing the margin.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.split('\n').filter(|line| !is_blank(line)) {
        let indent = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }
    let margin = margin.unwrap_or("").len();

    text.split('\n')
        .map(|line| if is_blank(line) { "" } else { &line[margin..] })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dedent a documentation template and strip surrounding blank lines.
pub fn normalize_doc(doc: &str) -> String {
    dedent(doc).trim().to_string()
}

/// Drop the newline a multi-line template literal carries after its opening
/// delimiter and the one before its closing delimiter.
///
/// At most one character is removed from each end, and only when it is `\n`.
pub fn trim_template_artifacts(text: &str) -> &str {
    let text = text.strip_prefix('\n').unwrap_or(text);
    text.strip_suffix('\n').unwrap_or(text)
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
