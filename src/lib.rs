//! Ndtreader: column-oriented reader for dependency treebanks
//!
//! Loads tab-separated treebank documents (one token per line) into a
//! single columnar token store, infers sentence boundaries from token-index
//! resets, and exposes word, lemma, tag, morphology and dependency views
//! plus dependency graphs built from the head column.

pub mod bytes; // Tab-field splitting and integer parsing
pub mod columns; // Column store built once at load time
pub mod config; // Reader configuration
pub mod error; // Error types
pub mod field; // Field selection and extracted rows
pub mod graph; // Dependency graphs from three-column blocks
pub mod parsed; // Parse-structure building
pub mod reader; // Corpus reader facade
pub mod source; // Document sources (memory, directory, gzip)
pub mod view; // Flat and sentence-grouped views

// Re-exports for convenience
pub use columns::{ColumnStore, ColumnStoreBuilder};
pub use config::ReaderConfig;
pub use error::{CorpusError, GraphError, Result};
pub use field::{Field, FieldSet, Row, Value};
pub use graph::{DependencyGraph, DependencyGraphBuilder, GraphBuilder, GraphNode};
pub use parsed::Tagset;
pub use reader::NdtReader;
pub use source::CorpusSource;
pub use view::{Extract, ViewExtractor};
