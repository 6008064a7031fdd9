//! Handlebars-based placeholder substitution.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled and HTML
//! escaping disabled. Strict mode makes any `{{key}}` that the attribute record lacks
//! an error instead of an empty string: generated C with a silently blank constant
//! would still compile far too often.
//!
//! Expression heads that name a built-in helper or keyword (`log`, `len`, `if`,
//! `this`, ...) never reach the data context, so an attribute record key with one of
//! those names cannot be substituted. Rendering such a reference fails with
//! [`RenderFailure::ReservedKey`] instead of running the helper.

use handlebars::{Handlebars, RenderErrorReason};
use thiserror::Error;

use crate::catalog::AttributeRecord;

/// Why a single substitution failed. The expander attaches the template part and
/// variant before surfacing it as a [`crate::GenError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderFailure {
    #[error("missing key {0:?}")]
    MissingKey(Option<String>),
    #[error("{0}")]
    Syntax(String),
    #[error("key '{0}' is shadowed by a built-in helper")]
    ReservedKey(String),
    #[error("{0}")]
    Render(String),
}

/// Names handlebars resolves as helpers or keywords before looking at the data.
pub const RESERVED_KEYS: [&str; 19] = [
    "if", "unless", "each", "with", "lookup", "raw", "log", "eq", "ne", "gt", "gte", "lt",
    "lte", "and", "or", "not", "len", "else", "this",
];

/// Placeholder renderer shared by every template of a generator.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode on and escaping off.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Substitute every placeholder in `template` from `attrs`.
    pub fn render(&self, template: &str, attrs: &AttributeRecord) -> Result<String, RenderFailure> {
        if let Some(key) = expression_heads(template)
            .find(|head| RESERVED_KEYS.contains(head) && attrs.get(head).is_some())
        {
            return Err(RenderFailure::ReservedKey(key.to_string()));
        }

        self.hbs
            .render_template(template, attrs)
            .map_err(|e| match e.reason() {
                RenderErrorReason::TemplateError(_) => RenderFailure::Syntax(e.to_string()),
                RenderErrorReason::MissingVariable(key) => RenderFailure::MissingKey(key.clone()),
                _ => RenderFailure::Render(e.to_string()),
            })
    }
}

/// First identifier of every `{{...}}` expression, skipping `\{{` escapes.
fn expression_heads(template: &str) -> impl Iterator<Item = &str> {
    template.match_indices("{{").filter_map(move |(at, _)| {
        if template[..at].ends_with('\\') {
            return None;
        }
        let rest = template[at + 2..].trim_start_matches(['{', '~', '#', '/', '^', '&', ' ', '\t']);
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len());
        (len > 0).then(|| &rest[..len])
    })
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
