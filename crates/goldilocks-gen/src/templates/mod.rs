//! Template machinery behind [`crate::expander::Generator`].
//!
//! - [`renderer`] substitutes `{{key}}` placeholders from an attribute record
//! - [`text`] normalizes doc bodies and applies the artifact-trimming rule
//! - [`decorator`] produces the `@file` doc comment block
//! - [`guard`] classifies header files and wraps them in include guards
//!
//! ## Placeholder syntax
//!
//! Templates use Handlebars expressions, e.g. `ed{{bits}}.h`. Keys resolve against
//! the current variant's [`crate::catalog::AttributeRecord`]. A literal `{{` in a C
//! body (nested initializers) must be escaped as `\{{`.
//! `{{! ... }}` and `{{!-- ... --}}` are Handlebars comments and are removed from
//! the output, so a C body must not start a brace pair with `!` unless it is escaped.
//! Attribute keys named like a built-in helper (`log`, `len`, `if`, ...) cannot be
//! referenced; see [`renderer::RESERVED_KEYS`].

pub mod decorator;
pub mod guard;
pub mod renderer;
pub mod text;
