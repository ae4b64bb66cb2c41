//! Error types for corpus loading, view extraction and graph building

use thiserror::Error;

/// Errors raised while loading or querying a corpus.
///
/// Load-time errors abort construction of the reader entirely. Query-time
/// errors abort only the single query; the loaded store stays usable.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A row that cannot be split into eight fields or whose index/head is not numeric
    #[error("Malformed row in {document} at line {line}: {reason}")]
    MalformedRow {
        document: String,
        line: usize,
        reason: String,
    },

    /// A listed document has no openable stream
    #[error("Cannot open document {document}: {source}")]
    MissingDocument {
        document: String,
        #[source]
        source: std::io::Error,
    },

    /// Read failure after the document was opened
    #[error("I/O error while reading {document}: {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },

    /// The same document id was loaded twice
    #[error("Document loaded twice: {0}")]
    DuplicateDocument(String),

    /// Optimized tags were loaded a second time into the same store
    #[error("Optimized tags already loaded from {0}")]
    TagsAlreadyLoaded(String),

    /// A query named a document that was never loaded
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    /// Optimized tags do not line up with the token columns
    #[error("Optimized tag count {tags} does not match token count {tokens}")]
    TagCountMismatch { tags: usize, tokens: usize },

    /// A select with no fields, when selections are required to be non-empty
    #[error("Field selection is empty")]
    EmptyFieldSelection,

    /// Invalid reader configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The dependency-graph constructor rejected a sentence block
    #[error("Sentence {sentence} rejected by graph builder: {source}")]
    Graph {
        sentence: usize,
        #[source]
        source: GraphError,
    },
}

/// Errors from the default dependency-graph constructor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Line {line}: expected word, tag and head, found {found} fields")]
    MalformedLine { line: usize, found: usize },

    #[error("Line {line}: invalid head {head:?}")]
    InvalidHead { line: usize, head: String },

    #[error("Line {line}: head {head} out of range for {len} tokens")]
    HeadOutOfRange { line: usize, head: i64, len: usize },
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;
