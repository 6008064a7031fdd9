//! Unified error types for template expansion.

use std::fmt;

use thiserror::Error;

/// Which of the three templates of a request an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart {
    /// The file name pattern.
    Name,
    /// The documentation body.
    Doc,
    /// The file body.
    Code,
}

impl fmt::Display for TemplatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Doc => "doc",
            Self::Code => "code",
        })
    }
}

/// All errors that can occur while expanding templates.
#[derive(Error, Debug)]
pub enum GenError {
    // --- Catalog ---

    /// The domain tag is not one of `global`, `field`, `curve`.
    #[error("unknown domain: {0} (supported: global, field, curve)")]
    UnknownDomain(String),

    /// The catalog JSON is malformed or names a domain that cannot be supplied.
    #[error("failed to parse parameter catalog")]
    CatalogParse(#[source] serde_json::Error),

    // --- Templates ---

    /// A placeholder references a key the variant's attribute record does not have.
    #[error(
        "{part} template for variant '{variant}' references missing key '{}'",
        .key.as_deref().unwrap_or("?")
    )]
    Substitution {
        part: TemplatePart,
        variant: String,
        key: Option<String>,
    },

    /// The template itself could not be parsed (e.g. unbalanced `{{`).
    #[error("{part} template for variant '{variant}' is malformed: {message}")]
    TemplateSyntax {
        part: TemplatePart,
        variant: String,
        message: String,
    },

    /// A placeholder names an attribute key that a built-in helper shadows.
    #[error("{part} template for variant '{variant}' uses key '{key}', which is a reserved helper name")]
    ReservedKey {
        part: TemplatePart,
        variant: String,
        key: String,
    },

    /// Rendering failed for a reason other than a missing key or bad syntax.
    #[error("{part} template for variant '{variant}' failed to render: {message}")]
    Render {
        part: TemplatePart,
        variant: String,
        message: String,
    },

    // --- Configuration ---

    /// The generator configuration JSON is malformed.
    #[error("failed to parse generator config")]
    ConfigParse(#[source] serde_json::Error),
}

/// Alias for `Result<T, GenError>`.
pub type Result<T> = std::result::Result<T, GenError>;
