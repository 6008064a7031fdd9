//! Parameter catalog: the per-variant substitution data driving expansion.
//!
//! The catalog is a two-level mapping, domain tag to variant identifier to
//! [`AttributeRecord`]. Its contents come from the build's curve and field tables;
//! the generator only reads it.
//!
//! Variants are held in a [`BTreeMap`], so every domain iterates in sorted
//! identifier order and repeated runs expand files in the same sequence.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GenError, Result};

/// Variant identifier used for the single implicit variant of [`Domain::Global`].
pub const GLOBAL_VARIANT: &str = "global";

/// Iteration domain selected by a template request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// One implicit variant with an empty attribute record.
    Global,
    /// One variant per field implementation (e.g. `p25519`, `p448`).
    Field,
    /// One variant per curve (e.g. `ed25519`, `ed448goldilocks`).
    Curve,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Field => "field",
            Self::Curve => "curve",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "global" => Ok(Self::Global),
            "field" => Ok(Self::Field),
            "curve" => Ok(Self::Curve),
            other => Err(GenError::UnknownDomain(other.to_string())),
        }
    }
}

/// Named substitution values for one variant.
///
/// Values are JSON scalars; strings render verbatim and numbers as decimal text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeRecord(BTreeMap<String, Value>);

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of one key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Variants of one domain, keyed by identifier.
pub type Variants = BTreeMap<String, AttributeRecord>;

/// Shape accepted by [`ParameterCatalog::from_json`]. `global` is implicit and
/// therefore rejected along with any other unknown section.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogTables {
    #[serde(default)]
    field: Variants,
    #[serde(default)]
    curve: Variants,
}

/// Read-only source of variant data for every domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCatalog {
    global: Variants,
    field: Variants,
    curve: Variants,
}

impl Default for ParameterCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterCatalog {
    /// Create a catalog with no field or curve variants.
    pub fn new() -> Self {
        let mut global = Variants::new();
        global.insert(GLOBAL_VARIANT.to_string(), AttributeRecord::new());
        Self {
            global,
            field: Variants::new(),
            curve: Variants::new(),
        }
    }

    /// Add (or replace) a field variant.
    pub fn with_field(mut self, id: impl Into<String>, record: AttributeRecord) -> Self {
        self.field.insert(id.into(), record);
        self
    }

    /// Add (or replace) a curve variant.
    pub fn with_curve(mut self, id: impl Into<String>, record: AttributeRecord) -> Self {
        self.curve.insert(id.into(), record);
        self
    }

    /// Build a catalog from `{"field": {id: {key: value}}, "curve": {...}}`.
    pub fn from_json(text: &str) -> Result<Self> {
        let tables: CatalogTables = serde_json::from_str(text).map_err(GenError::CatalogParse)?;
        Ok(Self {
            field: tables.field,
            curve: tables.curve,
            ..Self::new()
        })
    }

    /// Variants of a domain, by tag.
    pub fn lookup(&self, tag: &str) -> Result<&Variants> {
        Ok(self.variants(tag.parse()?))
    }

    /// Variants of a domain.
    pub fn variants(&self, domain: Domain) -> &Variants {
        match domain {
            Domain::Global => &self.global,
            Domain::Field => &self.field,
            Domain::Curve => &self.curve,
        }
    }
}
