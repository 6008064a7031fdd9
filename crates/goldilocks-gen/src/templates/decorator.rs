//! The `@file` doc comment placed at the top of every generated file.
//!
//! The closing warning reads "automatically generated." with no "in Python." suffix.

/// Copyright lines of the notice. The trailing `\n` is a Doxygen line break.
pub const COPYRIGHT: [&str; 2] = [
    "Copyright (c) 2015-2016 Cryptography Research, Inc.  \\n",
    "Released under the MIT License.  See LICENSE.txt for license information.",
];

/// Closing lines telling readers not to hand-edit the output.
pub const GENERATED_WARNING: [&str; 2] = [
    "@warning This file was automatically generated.",
    "Please do not edit it.",
];

/// Render the doc comment block for `file_name`.
///
/// `doc` is the already substituted doc body; each of its lines gets the ` * `
/// continuation prefix. The block starts with `/**`, ends with ` */` and has no
/// trailing newline. Continuation lines that would carry only whitespace after
/// the `*` are emitted as a bare ` *`.
pub fn decorate(file_name: &str, doc: &str, author: &str) -> String {
    let mut lines = vec![
        "/**".to_string(),
        format!(" * @file {file_name}"),
        format!(" * @author {author}"),
        " *".to_string(),
        " * @copyright".to_string(),
    ];
    lines.extend(COPYRIGHT.iter().map(|line| format!(" *   {line}")));
    lines.push(" *".to_string());
    lines.extend(doc.split('\n').map(|line| format!(" * {line}")));
    lines.push(" *".to_string());
    lines.extend(GENERATED_WARNING.iter().map(|line| format!(" * {line}")));
    lines.push(" */".to_string());

    lines
        .into_iter()
        .map(collapse_blank_continuation)
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_blank_continuation(line: String) -> String {
    match line.strip_prefix(" *") {
        Some(rest) if !rest.is_empty() && rest.trim().is_empty() => " *".to_string(),
        _ => line,
    }
}
