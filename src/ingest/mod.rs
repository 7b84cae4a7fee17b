//! Reading bibliography files into identifier sources.
//!
//! Files are gated by extension, read whole, run through
//! [`crate::parser::extract_report`], and upserted into a
//! [`SharedAggregator`] keyed by their file name. Only the derived
//! identifier list is kept; raw file content is dropped after extraction.

mod error;

pub use error::IngestError;

use std::fmt;
use std::path::Path;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::aggregator::SharedAggregator;
use crate::parser::extract_report;

/// Default number of files read concurrently.
pub const DEFAULT_INGEST_CONCURRENCY: usize = 4;

/// Bibliography formats accepted as file sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.bib` / `.bibtex`
    BibTex,
    /// `.ris`
    Ris,
}

impl SourceFormat {
    /// Extensions accepted for file sources, lowercase and without the dot.
    pub const ACCEPTED_EXTENSIONS: [&'static str; 3] = ["bib", "bibtex", "ris"];

    /// Detects the format from a file name's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedExtension`] for anything other than
    /// `.bib`, `.bibtex`, or `.ris`.
    pub fn from_file_name(file_name: &str) -> Result<Self, IngestError> {
        let extension = Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "bib" | "bibtex" => Ok(Self::BibTex),
            "ris" => Ok(Self::Ris),
            _ => Err(IngestError::unsupported(file_name, &extension)),
        }
    }

    /// Returns the stable display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BibTex => "BibTeX",
            Self::Ris => "RIS",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers derived from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    /// File name used as the source key
    pub name: String,
    /// Detected bibliography format
    pub format: SourceFormat,
    /// Extracted identifiers in first-occurrence order
    pub identifiers: Vec<String>,
    /// DOI-shaped tokens dropped because they did not decode
    pub skipped: usize,
}

/// Outcome of ingesting a batch of files.
#[derive(Debug, Default)]
pub struct IngestSummary {
    /// Files upserted into the aggregator, in argument order
    pub accepted: Vec<FileSource>,
    /// Files rejected or unreadable
    pub failed: Vec<IngestError>,
}

impl IngestSummary {
    /// Returns the total identifiers found across accepted files (before cross-file dedup).
    #[must_use]
    pub fn identifier_count(&self) -> usize {
        self.accepted.iter().map(|file| file.identifiers.len()).sum()
    }

    /// Returns true if every file was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Returns the source key for `path`: its final file name component.
///
/// # Errors
///
/// Returns [`IngestError::InvalidPath`] when the path has no file name.
pub fn source_name(path: &Path) -> Result<String, IngestError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| IngestError::invalid_path(path))
}

/// Reads one bibliography file and extracts its identifiers.
///
/// The extension is checked before any I/O. Content is decoded as UTF-8,
/// replacing invalid sequences, since exports from reference managers are
/// not always clean.
///
/// # Errors
///
/// Returns [`IngestError`] when the extension is unsupported, the path has
/// no file name, or the file cannot be read.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub async fn read_source_file(path: &Path) -> Result<FileSource, IngestError> {
    let name = source_name(path)?;
    let format = SourceFormat::from_file_name(&name)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|error| IngestError::read(path, &error))?;
    let text = String::from_utf8_lossy(&bytes);
    let report = extract_report(&text);

    debug!(
        file = %name,
        %format,
        bytes = bytes.len(),
        dois = report.identifiers.len(),
        "File read"
    );

    Ok(FileSource {
        name,
        format,
        identifiers: report.identifiers,
        skipped: report.skipped.len(),
    })
}

/// Reads `paths` concurrently and upserts each readable file into `aggregator`.
///
/// Up to `concurrency` files are read at once (minimum 1). Upserts happen in
/// argument order so the aggregate file order is deterministic. A failing
/// file is reported in the summary and never aborts the batch; it also never
/// touches the aggregator, so a prior source with the same name survives.
pub async fn ingest_files<P>(
    aggregator: &SharedAggregator,
    paths: &[P],
    concurrency: usize,
) -> IngestSummary
where
    P: AsRef<Path>,
{
    let mut summary = IngestSummary::default();
    let mut reads = stream::iter(paths.iter().map(|path| read_source_file(path.as_ref())))
        .buffered(concurrency.max(1));

    while let Some(result) = reads.next().await {
        match result {
            Ok(file) => {
                aggregator.upsert_file_source(file.name.clone(), file.identifiers.iter().cloned());
                summary.accepted.push(file);
            }
            Err(error) => {
                warn!(error = %error, "File rejected");
                summary.failed.push(error);
            }
        }
    }

    info!(
        accepted = summary.accepted.len(),
        failed = summary.failed.len(),
        dois = summary.identifier_count(),
        "File ingestion complete"
    );

    summary
}
