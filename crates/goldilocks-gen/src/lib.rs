//! Source file generator for the goldilocks library build.
//!
//! Expands one documentation/code template per variant of a [`catalog::ParameterCatalog`]
//! domain (`global`, `field`, `curve`), decorates every expansion with the standard
//! `@file` doc block and, for headers, an include guard, and records the result in a
//! [`registry::FileRegistry`] keyed by the expanded file name.
//!
//! The crate never touches the file system. A driving build script decides which
//! templates to register and persists the registry afterwards.
//!
//! ```ignore
//! use goldilocks_gen::{catalog::{AttributeRecord, ParameterCatalog}, expander::{Generator, TemplateRequest}, registry::FileRegistry};
//!
//! let catalog = ParameterCatalog::new()
//!     .with_curve("ed448", AttributeRecord::new().with("bits", 448));
//! let generator = Generator::new(catalog);
//! let mut registry = FileRegistry::new();
//! generator.register_template(
//!     &mut registry,
//!     &TemplateRequest::new(true, "ed{{bits}}.h", "Curve {{bits}}.", "\nint x;\n").per("curve"),
//! )?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod expander;
pub mod registry;
pub mod templates;

pub use catalog::{AttributeRecord, Domain, ParameterCatalog};
pub use config::GeneratorConfig;
pub use error::{GenError, Result, TemplatePart};
pub use expander::{Generator, TemplateRequest};
pub use registry::{FileRegistry, GeneratedFile};
