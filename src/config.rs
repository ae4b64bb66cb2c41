//! Reader configuration
//!
//! Knobs for the auxiliary tag file and for the compatibility quirks of the
//! sentence-grouping heuristic.

use crate::error::{CorpusError, Result};

/// Default document id of the optimized-tag file
pub const OPTIMIZED_TAGS_FILE: &str = "optimized.tags";

/// Configuration for an [`NdtReader`](crate::NdtReader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Document id of the optimized-tag file; `None` skips loading it
    pub optimized_tags: Option<String>,

    /// Drop a trailing sentence that holds a single token (compatibility quirk)
    pub drop_single_token_trailing_sentence: bool,

    /// Fail the load when the optimized-tag count differs from the token count
    pub strict_tag_count: bool,

    /// Fail selects that request no fields instead of yielding empty rows
    pub reject_empty_selection: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            optimized_tags: Some(OPTIMIZED_TAGS_FILE.to_string()),
            drop_single_token_trailing_sentence: true,
            strict_tag_count: false,
            reject_empty_selection: false,
        }
    }
}

impl ReaderConfig {
    pub fn with_optimized_tags(mut self, document: Option<&str>) -> Self {
        self.optimized_tags = document.map(str::to_string);
        self
    }

    pub fn with_drop_single_token_trailing_sentence(mut self, drop: bool) -> Self {
        self.drop_single_token_trailing_sentence = drop;
        self
    }

    pub fn with_strict_tag_count(mut self, strict: bool) -> Self {
        self.strict_tag_count = strict;
        self
    }

    pub fn with_reject_empty_selection(mut self, reject: bool) -> Self {
        self.reject_empty_selection = reject;
        self
    }

    /// Validate the configuration before loading
    pub fn validate(&self) -> Result<()> {
        if let Some(tags) = &self.optimized_tags {
            if tags.trim().is_empty() {
                return Err(CorpusError::Config(
                    "optimized tag document id must not be empty".to_string(),
                ));
            }
        }
        if self.strict_tag_count && self.optimized_tags.is_none() {
            return Err(CorpusError::Config(
                "strict_tag_count requires an optimized tag document".to_string(),
            ));
        }
        Ok(())
    }
}
