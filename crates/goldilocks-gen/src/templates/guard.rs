//! Header classification and include guards.

/// File name suffixes that mark a generated file as a header.
pub const HEADER_SUFFIXES: [&str; 3] = [".h", ".hxx", ".h++"];

/// Whether `file_name` gets an include guard.
pub fn is_header(file_name: &str) -> bool {
    HEADER_SUFFIXES.iter().any(|suffix| file_name.ends_with(suffix))
}

/// Last path segment of `file_name`.
pub fn base_name(file_name: &str) -> &str {
    file_name.rsplit('/').next().unwrap_or(file_name)
}

/// Include guard macro for `file_name`: `goldilocks/ed448.h` becomes
/// `__GOLDILOCKS_ED448_H__`.
///
/// Only `.` and `/` are rewritten; other characters pass through upper-cased.
pub fn header_guard(file_name: &str) -> String {
    format!(
        "__{}__",
        file_name.replace(['.', '/'], "_").to_uppercase()
    )
}

/// Wrap `code` in an `#ifndef` block, including the leading blank line and the
/// trailing newline artifacts that [`super::text::trim_template_artifacts`] removes.
pub fn wrap(code: &str, guard: &str) -> String {
    format!("\n\n#ifndef {guard}\n#define {guard} 1\n{code}\n#endif /* {guard} */\n")
}
