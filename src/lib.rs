//! Oshima Core Library
//!
//! This library collects DOIs from unstructured input (pasted text, BibTeX
//! and RIS exports), merges them across independently-updated sources, and
//! submits the result to a paper recommendation service.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - DOI extraction and normalization from raw text
//! - [`aggregator`] - Named identifier sources and their deduplicated union
//! - [`ingest`] - Reading `.bib`/`.bibtex`/`.ris` files into sources
//! - [`recommend`] - Recommendation service client
//!
//! # Example
//!
//! ```
//! use oshima_core::{SourceAggregator, extract};
//!
//! let mut sources = SourceAggregator::new();
//! sources.set_pasted_source(extract("doi:10.1038/nphys1170, https://doi.org/10.1000/182"));
//! sources.upsert_file_source("refs.bib", extract("doi = {10.1000/182}"));
//! assert_eq!(sources.get_aggregate(), ["10.1038/nphys1170", "10.1000/182"]);
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod ingest;
pub mod parser;
pub mod recommend;
mod user_agent;

// Re-export commonly used types
pub use aggregator::{DEFAULT_QUERY_CAP, SharedAggregator, SourceAggregator, SourceKey};
pub use ingest::{FileSource, IngestError, IngestSummary, SourceFormat, ingest_files, read_source_file};
pub use parser::{ExtractReport, ParseError, extract, extract_report};
pub use recommend::{
    ClientConfig, HttpRecommender, Recommendation, RecommendError, Recommender, submit,
};
