//! Import collection for generated sources
//!
//! Every component that emits a construct needing an import (annotations,
//! `GenerationType`, column types, interfaces, the superclass) records the
//! fully-qualified name here. The set is read once when the template context
//! is built.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::{JavaType, TypeMapper};

/// Deduplicated, sorted set of fully-qualified type names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportSet {
    names: BTreeSet<String>,
}

impl ImportSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Record a fully-qualified name
    ///
    /// Names in `java.lang` or without a package are skipped. Returns whether
    /// the name was newly added.
    pub fn insert(&mut self, qualified_name: impl Into<String>) -> bool {
        let name = qualified_name.into();
        if TypeMapper::is_implicitly_imported(&name) {
            return false;
        }
        self.names.insert(name)
    }

    /// Record the import a column type needs, if any
    pub fn insert_type(&mut self, java_type: &JavaType) -> bool {
        TypeMapper::import_for(java_type).is_some_and(|name| self.insert(name))
    }

    /// Whether a name has been recorded
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.names.contains(qualified_name)
    }

    /// Number of recorded names
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ImportSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl<S: Into<String>> Extend<S> for ImportSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}
