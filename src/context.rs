//! Per-document build state.
//!
//! Every document pass gets its own [`BuildContext`], threaded by `&mut` through
//! all directive runs. The active name path lives inside it, so two passes can
//! never observe each other's nesting.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::path::DottedPath;

/// Owns the active dotted path of one build context.
#[derive(Debug, Default)]
pub struct NameResolver {
    active: Option<DottedPath>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active path, created on first access and reused afterwards.
    pub fn current_path(&mut self) -> &mut DottedPath {
        self.active.get_or_insert_with(DottedPath::new)
    }

    /// Whether the path has been created and currently holds segments.
    pub fn is_nested(&self) -> bool {
        self.active.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// A described object registered for cross-referencing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub full_name: String,
    pub objtype: String,
    pub line: usize,
}

#[derive(Debug)]
pub struct BuildContext {
    docname: String,
    resolver: NameResolver,
    objects: BTreeMap<String, ObjectEntry>,
}

impl BuildContext {
    pub fn new(docname: impl Into<String>) -> Self {
        Self {
            docname: docname.into(),
            resolver: NameResolver::new(),
            objects: BTreeMap::new(),
        }
    }

    pub fn docname(&self) -> &str {
        &self.docname
    }

    pub fn current_path(&mut self) -> &mut DottedPath {
        self.resolver.current_path()
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Record a described object. The first description of a name wins; later
    /// ones are reported and ignored.
    pub fn note_object(&mut self, full_name: &str, objtype: &str, line: usize) -> bool {
        if let Some(existing) = self.objects.get(full_name) {
            warn!(
                doc = %self.docname,
                name = full_name,
                line,
                first_line = existing.line,
                "duplicate object description, other instance kept"
            );
            return false;
        }
        self.objects.insert(
            full_name.to_string(),
            ObjectEntry {
                full_name: full_name.to_string(),
                objtype: objtype.to_string(),
                line,
            },
        );
        true
    }

    pub fn into_objects(self) -> Vec<ObjectEntry> {
        self.objects.into_values().collect()
    }
}
