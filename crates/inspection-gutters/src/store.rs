//! Per-file, per-source result storage.

use std::collections::{BTreeMap, HashMap};

use crate::diagnostics::DiagnosticResult;
use crate::filter::FilterOptions;

/// Results for one file, keyed by source id.
///
/// A `BTreeMap` keeps [`ResultStore::query`] output deterministic across runs.
type SourceResults = BTreeMap<String, Vec<DiagnosticResult>>;

/// `file -> source -> results`.
///
/// A missing file entry means nothing was ever published for it. An empty list under a source
/// means that source published zero results, which still overwrites whatever it published before.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    files: HashMap<String, SourceResults>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `source`'s results for `file` with the filtered `results`.
    ///
    /// Returns the number of results that were kept.
    pub fn publish(
        &mut self,
        source: &str,
        file: &str,
        results: Vec<DiagnosticResult>,
        filter: FilterOptions,
    ) -> usize {
        let kept = filter.apply(source, results);
        let count = kept.len();
        self.files
            .entry(file.to_string())
            .or_default()
            .insert(source.to_string(), kept);
        count
    }

    /// Union of every source's current results for `file`, unsorted.
    pub fn query(&self, file: &str) -> Vec<DiagnosticResult> {
        self.files
            .get(file)
            .map(|sources| sources.values().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// Results `source` last published for `file`.
    ///
    /// `None` if that source never published for that file.
    pub fn source_results(&self, source: &str, file: &str) -> Option<&[DiagnosticResult]> {
        self.files
            .get(file)
            .and_then(|sources| sources.get(source))
            .map(Vec::as_slice)
    }

    /// Ids of the sources that have published for `file`.
    pub fn sources(&self, file: &str) -> Vec<&str> {
        self.files
            .get(file)
            .map(|sources| sources.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if anything was ever published for `file`.
    pub fn contains_file(&self, file: &str) -> bool {
        self.files.contains_key(file)
    }

    /// Drop every source's results for `file`.
    ///
    /// Returns `true` if the file had an entry.
    pub fn forget_file(&mut self, file: &str) -> bool {
        self.files.remove(file).is_some()
    }

    /// Number of files with an entry.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file has an entry.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.files.clear();
    }
}
