//! Per-variant template expansion and registration.
//!
//! For every variant of the requested domain, [`Generator::expand`]:
//!
//! 1. substitutes the name pattern to get the expanded file name
//! 2. derives the include guard from the expanded name
//! 3. dedents and substitutes the doc template, then wraps it in the `@file` block
//! 4. substitutes the code template
//! 5. wraps the code in the include guard when the expanded name is a header
//! 6. joins doc block and code, trimming the template's edge newlines
//!
//! [`Generator::register_template`] runs the expansion and inserts the results into a
//! [`FileRegistry`]. A failure in any variant aborts the call before anything is
//! inserted.

use crate::catalog::{AttributeRecord, Domain, ParameterCatalog};
use crate::config::GeneratorConfig;
use crate::error::{GenError, Result, TemplatePart};
use crate::registry::{FileRegistry, GeneratedFile};
use crate::templates::renderer::{RenderFailure, TemplateRenderer};
use crate::templates::{decorator, guard, text};

/// One template registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    /// Visibility of every file this request produces.
    pub public: bool,
    /// Output file name, e.g. `goldilocks/ed{{bits}}.h`.
    pub name_pattern: String,
    /// Documentation body placed inside the `@file` block.
    pub doc_template: String,
    /// File body.
    pub code_template: String,
    /// Domain tag: `global`, `field` or `curve`.
    pub domain: String,
    /// `@author` value; the generator's default author when `None`.
    pub author: Option<String>,
}

impl TemplateRequest {
    /// A request over the `global` domain with the default author.
    pub fn new(
        public: bool,
        name_pattern: impl Into<String>,
        doc_template: impl Into<String>,
        code_template: impl Into<String>,
    ) -> Self {
        Self {
            public,
            name_pattern: name_pattern.into(),
            doc_template: doc_template.into(),
            code_template: code_template.into(),
            domain: Domain::Global.as_str().into(),
            author: None,
        }
    }

    /// Expand once per variant of `domain`.
    pub fn per(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Expands template requests against a parameter catalog.
pub struct Generator {
    catalog: ParameterCatalog,
    config: GeneratorConfig,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(catalog: ParameterCatalog) -> Self {
        Self::with_config(catalog, GeneratorConfig::default())
    }

    pub fn with_config(catalog: ParameterCatalog, config: GeneratorConfig) -> Self {
        Self {
            catalog,
            config,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Expand `request` and insert one entry per variant into `registry`,
    /// replacing entries with the same expanded name.
    ///
    /// Returns the number of files written.
    pub fn register_template(
        &self,
        registry: &mut FileRegistry,
        request: &TemplateRequest,
    ) -> Result<usize> {
        let files = self.expand(request)?;
        let count = files.len();
        for (name, file) in files {
            registry.insert(name, file);
        }
        Ok(count)
    }

    /// Expand `request` for every variant of its domain, in variant-id order.
    pub fn expand(&self, request: &TemplateRequest) -> Result<Vec<(String, GeneratedFile)>> {
        let variants = self.catalog.lookup(&request.domain)?;
        tracing::info!(
            "expanding {} over {} {} variant(s)",
            request.name_pattern,
            variants.len(),
            request.domain
        );

        let author = request
            .author
            .as_deref()
            .unwrap_or(self.config.default_author.as_str());
        let doc_template = text::normalize_doc(&request.doc_template);

        variants
            .iter()
            .map(|(variant, attrs)| {
                self.expand_variant(request, &doc_template, author, variant, attrs)
            })
            .collect()
    }

    fn expand_variant(
        &self,
        request: &TemplateRequest,
        doc_template: &str,
        author: &str,
        variant: &str,
        attrs: &AttributeRecord,
    ) -> Result<(String, GeneratedFile)> {
        let substitute = |part: TemplatePart, template: &str| {
            self.renderer
                .render(template, attrs)
                .map_err(|failure| match failure {
                    RenderFailure::MissingKey(key) => GenError::Substitution {
                        part,
                        variant: variant.to_string(),
                        key,
                    },
                    RenderFailure::Syntax(message) => GenError::TemplateSyntax {
                        part,
                        variant: variant.to_string(),
                        message,
                    },
                    RenderFailure::ReservedKey(key) => GenError::ReservedKey {
                        part,
                        variant: variant.to_string(),
                        key,
                    },
                    RenderFailure::Render(message) => GenError::Render {
                        part,
                        variant: variant.to_string(),
                        message,
                    },
                })
        };

        let name = substitute(TemplatePart::Name, &request.name_pattern)?;
        let header = guard::is_header(&name);
        tracing::debug!(
            "generating {name} ({}, header: {header}) for {variant}",
            guard::base_name(&name)
        );

        let doc = decorator::decorate(&name, &substitute(TemplatePart::Doc, doc_template)?, author);
        let mut code = substitute(TemplatePart::Code, &request.code_template)?;
        if header {
            code = guard::wrap(&code, &guard::header_guard(&name));
        }

        let text = format!("{doc}\n{}", text::trim_template_artifacts(&code));
        Ok((
            name,
            GeneratedFile {
                public: request.public,
                text,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use proptest::prelude::*;

    fn catalog() -> ParameterCatalog {
        ParameterCatalog::new()
            .with_curve(
                "ed448goldilocks",
                AttributeRecord::new()
                    .with("bits", 448)
                    .with("c_ns", "GOLDILOCKS_448"),
            )
            .with_curve(
                "ed25519",
                AttributeRecord::new()
                    .with("bits", 255)
                    .with("c_ns", "GOLDILOCKS_255"),
            )
            .with_field("p448", AttributeRecord::new().with("gf_shortname", "p448"))
    }

    #[test]
    fn test_curve_example_two_headers() {
        let catalog = ParameterCatalog::new()
            .with_curve("448", AttributeRecord::new().with("bits", "448"))
            .with_curve("255", AttributeRecord::new().with("bits", "255"));
        let mut registry = FileRegistry::new();
        let count = Generator::new(catalog)
            .register_template(
                &mut registry,
                &TemplateRequest::new(true, "ed_{{bits}}.h", "Ed{{bits}}.", "\nint x;\n").per("curve"),
            )
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["ed_255.h", "ed_448.h"]);
        for (name, guard) in [("ed_448.h", "__ED_448_H__"), ("ed_255.h", "__ED_255_H__")] {
            let file = registry.get(name).unwrap();
            assert!(file.public);
            assert!(file.text.contains(&format!("#ifndef {guard}\n#define {guard} 1\n")));
            assert!(file.text.ends_with(&format!("#endif /* {guard} */")));
        }
    }

    #[test]
    fn test_header_exact_output() {
        let request = TemplateRequest::new(
            true,
            "goldilocks/ed{{bits}}.h",
            "\n    @brief Ed{{bits}} group.\n",
            "\n#include <stdint.h>\n#define {{c_ns}}_BITS {{bits}}\n",
        )
        .per("curve");
        let files = Generator::new(catalog()).expand(&request).unwrap();
        let (name, file) = files
            .iter()
            .find(|(name, _)| name == "goldilocks/ed448.h")
            .unwrap();

        let expected = indoc! {r"
            /**
             * @file goldilocks/ed448.h
             * @author Mike Hamburg
             *
             * @copyright
             *   Copyright (c) 2015-2016 Cryptography Research, Inc.  \n
             *   Released under the MIT License.  See LICENSE.txt for license information.
             *
             * @brief Ed448 group.
             *
             * @warning This file was automatically generated.
             * Please do not edit it.
             */

            #ifndef __GOLDILOCKS_ED448_H__
            #define __GOLDILOCKS_ED448_H__ 1

            #include <stdint.h>
            #define GOLDILOCKS_448_BITS 448

            #endif /* __GOLDILOCKS_ED448_H__ */"};
        assert_eq!(name, "goldilocks/ed448.h");
        assert_eq!(file.text, expected);
    }

    #[test]
    fn test_non_header_exact_output() {
        let request = TemplateRequest::new(
            false,
            "f_{{gf_shortname}}.c",
            "Field {{gf_shortname}}.",
            "\nvoid gf_{{gf_shortname}}_mul(void);\n",
        )
        .per("field")
        .author("libgoldilocks");
        let files = Generator::new(catalog()).expand(&request).unwrap();
        assert_eq!(files.len(), 1);

        let (name, file) = &files[0];
        assert_eq!(name, "f_p448.c");
        assert!(!file.public);
        assert!(!file.text.contains("#ifndef"));
        assert!(!file.text.contains("#endif"));
        assert!(file.text.contains(" * @author libgoldilocks\n"));
        assert!(file.text.contains(" * Field p448.\n"));
        assert!(file.text.ends_with(" */\nvoid gf_p448_mul(void);"));
    }

    #[test]
    fn test_global_domain_single_entry() {
        let mut registry = FileRegistry::new();
        let count = Generator::new(catalog())
            .register_template(
                &mut registry,
                &TemplateRequest::new(true, "goldilocks.h", "Umbrella header.", "\n#include \"goldilocks/ed448.h\"\n"),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(registry.len(), 1);
        assert!(registry
            .get("goldilocks.h")
            .unwrap()
            .text
            .contains("#ifndef __GOLDILOCKS_H__"));
    }

    #[test]
    fn test_missing_key_registers_nothing() {
        let mut registry = FileRegistry::new();
        let err = Generator::new(catalog())
            .register_template(
                &mut registry,
                &TemplateRequest::new(true, "ed{{bits}}.h", "doc", "\n{{gf_bits}}\n").per("curve"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::Substitution { part: TemplatePart::Code, .. }
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_key_in_name_and_doc() {
        let generator = Generator::new(catalog());
        let err = generator
            .expand(&TemplateRequest::new(true, "ed{{bits}}.h", "x", "y"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::Substitution { part: TemplatePart::Name, ref variant, .. } if variant == "global"
        ));

        let err = generator
            .expand(&TemplateRequest::new(true, "ed{{bits}}.h", "{{name}}", "y").per("curve"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::Substitution { part: TemplatePart::Doc, .. }
        ));
    }

    #[test]
    fn test_unknown_domain() {
        let mut registry = FileRegistry::new();
        let err = Generator::new(catalog())
            .register_template(
                &mut registry,
                &TemplateRequest::new(true, "x.h", "", "").per("scalar"),
            )
            .unwrap_err();
        assert!(matches!(err, GenError::UnknownDomain(ref tag) if tag == "scalar"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_helper_named_attribute_fails_loudly() {
        let catalog = ParameterCatalog::new()
            .with_field("p448", AttributeRecord::new().with("log", "VAL").with("len", 56));
        let generator = Generator::new(catalog);
        let mut registry = FileRegistry::new();

        let err = generator
            .register_template(&mut registry, &TemplateRequest::new(true, "x_{{log}}.c", "", "").per("field"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::ReservedKey { part: TemplatePart::Name, ref key, .. } if key == "log"
        ));

        let err = generator
            .expand(&TemplateRequest::new(true, "x.c", "", "\n#define N {{len}}\n").per("field"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::ReservedKey { part: TemplatePart::Code, ref key, .. } if key == "len"
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_accessors_reflect_construction() {
        let config = GeneratorConfig {
            default_author: "libgoldilocks".into(),
        };
        let generator = Generator::with_config(catalog(), config.clone());
        assert_eq!(generator.config(), &config);
        assert_eq!(generator.catalog(), &catalog());
        assert_eq!(generator.catalog().lookup("curve").unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_template() {
        let err = Generator::new(catalog())
            .expand(&TemplateRequest::new(true, "x.h", "", "{{bits"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::TemplateSyntax { part: TemplatePart::Code, .. }
        ));
    }

    #[test]
    fn test_second_registration_overwrites() {
        let generator = Generator::new(catalog());
        let mut registry = FileRegistry::new();
        generator
            .register_template(&mut registry, &TemplateRequest::new(true, "api.h", "first", "\nint a;\n"))
            .unwrap();
        generator
            .register_template(&mut registry, &TemplateRequest::new(false, "api.h", "second", "\nint b;\n"))
            .unwrap();

        assert_eq!(registry.len(), 1);
        let file = registry.get("api.h").unwrap();
        assert!(!file.public);
        assert!(file.text.contains(" * second\n"));
        assert!(file.text.contains("int b;"));
        assert!(!file.text.contains("int a;"));
    }

    #[test]
    fn test_default_author_from_config() {
        let config = GeneratorConfig {
            default_author: "libgoldilocks contributors".into(),
        };
        let files = Generator::with_config(catalog(), config)
            .expand(&TemplateRequest::new(true, "x.c", "", ""))
            .unwrap();
        assert!(files[0].1.text.contains(" * @author libgoldilocks contributors\n"));
    }

    #[test]
    fn test_doc_dedented_and_stripped() {
        let doc = "\n\n        @brief Ed{{bits}} points.\n\n          Indented detail.\n\n    ";
        let files = Generator::new(catalog())
            .expand(&TemplateRequest::new(true, "p{{bits}}.c", doc, "").per("curve"))
            .unwrap();
        let text = &files[0].1.text;
        assert!(text.contains("\n *\n * @brief Ed255 points.\n *\n *   Indented detail.\n *\n * @warning"));
    }

    #[test]
    fn test_empty_code_non_header() {
        let files = Generator::new(catalog())
            .expand(&TemplateRequest::new(false, "x.c", "d", ""))
            .unwrap();
        assert!(files[0].1.text.ends_with(" */\n"));
    }

    proptest! {
        #[test]
        fn expansion_is_deterministic(
            name in "[a-z]{1,6}(/[a-z0-9_]{1,6})?\\.(c|h|hxx|h\\+\\+)",
            doc in "[ a-zA-Z.\n]{0,40}",
            code in "[ a-z;#\n]{0,40}",
        ) {
            let generator = Generator::new(catalog());
            let request = TemplateRequest::new(true, name, doc, code).per("curve");
            let mut first = FileRegistry::new();
            let mut second = FileRegistry::new();
            generator.register_template(&mut first, &request).unwrap();
            generator.register_template(&mut second, &request).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn headers_get_exactly_one_guard(
            stem in "[a-z]{1,6}(/[a-z0-9_]{1,6})?",
            suffix in "\\.(h|hxx|h\\+\\+)",
        ) {
            let name = format!("{stem}{suffix}");
            let guard = format!(
                "__{}__",
                name.replace('.', "_").replace('/', "_").to_uppercase()
            );
            let files = Generator::new(catalog())
                .expand(&TemplateRequest::new(true, name.clone(), "doc", "\nint x;\n"))
                .unwrap();
            let text = &files[0].1.text;
            prop_assert_eq!(text.matches(&format!("#ifndef {guard}\n")).count(), 1);
            prop_assert_eq!(text.matches(&format!("#define {guard} 1\n")).count(), 1);
            prop_assert_eq!(text.matches(&format!("#endif /* {guard} */")).count(), 1);
        }

        #[test]
        fn non_headers_have_no_guard(
            stem in "[a-z]{1,6}(/[a-z0-9_]{1,6})?",
            suffix in "\\.(c|cxx|hpp|txt)",
        ) {
            let files = Generator::new(catalog())
                .expand(&TemplateRequest::new(false, format!("{stem}{suffix}"), "doc", "\nint x;\n"))
                .unwrap();
            let text = &files[0].1.text;
            prop_assert!(!text.contains("#ifndef"));
            prop_assert!(!text.contains("#define"));
            prop_assert!(!text.contains("#endif"));
        }
    }
}
