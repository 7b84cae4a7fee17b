//! Named identifier sources and their deduplicated union.
//!
//! A [`SourceAggregator`] holds one optional pasted-text source and any
//! number of file sources keyed by file name. Every write replaces exactly
//! one source wholesale; the union is recomputed from scratch on each read,
//! so the result depends only on which sources currently exist.
//!
//! # Example
//!
//! ```
//! use oshima_core::SourceAggregator;
//!
//! let mut sources = SourceAggregator::new();
//! sources.set_pasted_source(["10.1/a"]);
//! sources.upsert_file_source("f.bib", ["10.1/b"]);
//! assert_eq!(sources.get_aggregate(), ["10.1/a", "10.1/b"]);
//!
//! sources.upsert_file_source("f.bib", ["10.1/c"]);
//! assert_eq!(sources.get_aggregate(), ["10.1/a", "10.1/c"]);
//!
//! sources.remove_file_source("f.bib");
//! assert_eq!(sources.get_aggregate(), ["10.1/a"]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Maximum number of identifiers sent in one recommendation request.
pub const DEFAULT_QUERY_CAP: usize = 50;

/// Identifies one source of identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// The singleton paste area
    Pasted,
    /// An uploaded file, keyed by its file name
    File(String),
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pasted => write!(f, "pasted text"),
            Self::File(name) => write!(f, "file '{name}'"),
        }
    }
}

/// Identifier sources with an on-demand deduplicated union.
///
/// Identifiers are stored as given; syntax checking happens in
/// [`crate::parser::extract`] before they get here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAggregator {
    pasted: Option<Vec<String>>,
    // Insertion order is traversal order.
    files: Vec<(String, Vec<String>)>,
}

impl SourceAggregator {
    /// Creates an aggregator with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pasted-text source.
    pub fn set_pasted_source<I>(&mut self, identifiers: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let identifiers = collect_identifiers(identifiers);
        debug!(count = identifiers.len(), "Pasted source replaced");
        self.pasted = Some(identifiers);
    }

    /// Creates or fully replaces the source for `file_name`.
    ///
    /// A replaced file counts as a fresh insertion and moves to the end of
    /// the file order.
    pub fn upsert_file_source<I>(&mut self, file_name: impl Into<String>, identifiers: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let file_name = file_name.into();
        let identifiers = collect_identifiers(identifiers);
        let replaced = self.take_file(&file_name).is_some();
        debug!(
            file = %file_name,
            count = identifiers.len(),
            replaced,
            "File source upserted"
        );
        self.files.push((file_name, identifiers));
    }

    /// Removes the source for `file_name`; does nothing if it is absent.
    pub fn remove_file_source(&mut self, file_name: &str) {
        if self.take_file(file_name).is_some() {
            debug!(file = %file_name, "File source removed");
        }
    }

    /// Returns the deduplicated union of all sources.
    ///
    /// Order: pasted identifiers first, then each file in insertion order;
    /// a duplicate keeps its first position in that traversal.
    #[must_use]
    pub fn get_aggregate(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.iter_identifiers()
            .filter(|identifier| seen.insert(*identifier))
            .map(str::to_string)
            .collect()
    }

    /// Returns the first `limit` entries of [`Self::get_aggregate`].
    #[must_use]
    pub fn get_aggregate_capped(&self, limit: usize) -> Vec<String> {
        let mut aggregate = self.get_aggregate();
        aggregate.truncate(limit);
        aggregate
    }

    /// Returns the identifiers owned by one source.
    #[must_use]
    pub fn source(&self, key: &SourceKey) -> Option<&[String]> {
        match key {
            SourceKey::Pasted => self.pasted.as_deref(),
            SourceKey::File(name) => self
                .files
                .iter()
                .find(|(file, _)| file == name)
                .map(|(_, ids)| ids.as_slice()),
        }
    }

    /// Returns the keys of all present sources in traversal order.
    #[must_use]
    pub fn keys(&self) -> Vec<SourceKey> {
        self.pasted
            .iter()
            .map(|_| SourceKey::Pasted)
            .chain(self.files.iter().map(|(name, _)| SourceKey::File(name.clone())))
            .collect()
    }

    /// Returns file source names in insertion order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(name, _)| name.as_str())
    }

    /// Returns true once a pasted source has been set.
    #[must_use]
    pub fn has_pasted_source(&self) -> bool {
        self.pasted.is_some()
    }

    /// Returns the number of present sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        usize::from(self.pasted.is_some()) + self.files.len()
    }

    /// Returns true when no source holds any identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter_identifiers().next().is_none()
    }

    fn iter_identifiers(&self) -> impl Iterator<Item = &str> {
        self.pasted
            .iter()
            .flatten()
            .chain(self.files.iter().flat_map(|(_, ids)| ids.iter()))
            .map(String::as_str)
    }

    fn take_file(&mut self, file_name: &str) -> Option<Vec<String>> {
        let index = self.files.iter().position(|(name, _)| name == file_name)?;
        Some(self.files.remove(index).1)
    }
}

fn collect_identifiers<I>(identifiers: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    identifiers.into_iter().map(Into::into).collect()
}

/// Cloneable handle that serializes writes from concurrent tasks.
///
/// Each operation takes the lock for its own duration only, so concurrent
/// upserts to distinct file names never interleave within one source.
#[derive(Debug, Clone, Default)]
pub struct SharedAggregator {
    inner: Arc<Mutex<SourceAggregator>>,
}

impl SharedAggregator {
    /// Creates a handle around an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`SourceAggregator::set_pasted_source`].
    pub fn set_pasted_source<I>(&self, identifiers: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lock().set_pasted_source(identifiers);
    }

    /// See [`SourceAggregator::upsert_file_source`].
    pub fn upsert_file_source<I>(&self, file_name: impl Into<String>, identifiers: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lock().upsert_file_source(file_name, identifiers);
    }

    /// See [`SourceAggregator::remove_file_source`].
    pub fn remove_file_source(&self, file_name: &str) {
        self.lock().remove_file_source(file_name);
    }

    /// See [`SourceAggregator::get_aggregate`].
    #[must_use]
    pub fn get_aggregate(&self) -> Vec<String> {
        self.lock().get_aggregate()
    }

    /// See [`SourceAggregator::get_aggregate_capped`].
    #[must_use]
    pub fn get_aggregate_capped(&self, limit: usize) -> Vec<String> {
        self.lock().get_aggregate_capped(limit)
    }

    /// Returns a copy of the current sources.
    #[must_use]
    pub fn snapshot(&self) -> SourceAggregator {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SourceAggregator> {
        // Every write replaces a whole source, so a poisoned guard still holds consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<SourceAggregator> for SharedAggregator {
    fn from(aggregator: SourceAggregator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(aggregator)),
        }
    }
}
