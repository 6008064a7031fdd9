//! Accumulator for generated files.
//!
//! A [`FileRegistry`] is created once by the driving build script, passed to every
//! [`crate::Generator::register_template`] call and read at the end of the run. Entries
//! are keyed by expanded file name; registering the same name again replaces the
//! earlier entry. Iteration is in file-name order.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Installed with the public headers rather than kept internal.
    pub public: bool,
    /// Final file contents: doc block, then the (possibly guarded) body.
    pub text: String,
}

/// Generated files by expanded name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRegistry {
    files: BTreeMap<String, GeneratedFile>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `file` under `name`, returning the entry it replaced.
    pub fn insert(&mut self, name: impl Into<String>, file: GeneratedFile) -> Option<GeneratedFile> {
        let name = name.into();
        let previous = self.files.insert(name.clone(), file);
        if previous.is_some() {
            tracing::debug!("overwriting generated file {name}");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&GeneratedFile> {
        self.files.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, GeneratedFile> {
        self.files.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Files to install alongside the public API headers.
    pub fn public_files(&self) -> impl Iterator<Item = (&str, &GeneratedFile)> {
        self.iter()
            .filter(|(_, file)| file.public)
            .map(|(name, file)| (name.as_str(), file))
    }

    /// Files that stay internal to the build.
    pub fn private_files(&self) -> impl Iterator<Item = (&str, &GeneratedFile)> {
        self.iter()
            .filter(|(_, file)| !file.public)
            .map(|(name, file)| (name.as_str(), file))
    }

    /// Manifest of `{name: {public, text}}` for an out-of-process writer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn into_inner(self) -> BTreeMap<String, GeneratedFile> {
        self.files
    }
}

impl<'a> IntoIterator for &'a FileRegistry {
    type Item = (&'a String, &'a GeneratedFile);
    type IntoIter = btree_map::Iter<'a, String, GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
