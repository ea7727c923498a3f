//! Shared substitution terms available to every template.

use std::collections::BTreeMap;

/// Key under which the caller's version string is injected.
pub const PROGRAM_VERSION_KEY: &str = "program_version";

/// Fixed + dynamic substitution terms for one generation run.
///
/// Built once per run and installed as engine globals so every template
/// sees them without explicit passing. Immutable after construction.
#[derive(Clone, Debug)]
pub struct Terms {
    map: BTreeMap<String, String>,
}

impl Terms {
    /// Create the term map with the fixed naming entries and the dynamic
    /// `program_version` entry.
    #[must_use]
    pub fn new(program_version: &str) -> Self {
        let mut map = BTreeMap::new();
        for (key, value) in [
            ("company_name", "Docgen"),
            ("solution_name", "Docgen Documentation Generator"),
            ("project_name", "docgen"),
            ("source_repo_organization", "docgen"),
        ] {
            map.insert(key.to_owned(), value.to_owned());
        }
        map.insert(PROGRAM_VERSION_KEY.to_owned(), program_version.to_owned());
        Self { map }
    }

    /// Create the term map with additional entries from configuration.
    ///
    /// Extra entries may override the fixed defaults but never the injected
    /// `program_version`.
    #[must_use]
    pub fn with_extra(program_version: &str, extra: &BTreeMap<String, String>) -> Self {
        let mut terms = Self::new(program_version);
        for (key, value) in extra {
            if key != PROGRAM_VERSION_KEY {
                terms.map.insert(key.clone(), value.clone());
            }
        }
        terms
    }

    /// Look up a term value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Iterate over terms in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
