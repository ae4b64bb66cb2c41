//! View extraction
//!
//! Read-only queries over a [`ColumnStore`]: pick some fields, optionally
//! restrict to a set of documents, and get the rows back either flat or
//! grouped into sentences.
//!
//! Sentence boundaries are inferred: a token whose index is lower than the
//! previous token's index starts a new sentence. Documents are not
//! boundaries by themselves, so a reset at a document seam behaves exactly
//! like a reset inside a document.

use crate::columns::ColumnStore;
use crate::error::{CorpusError, Result};
use crate::field::{Field, FieldSet, Row, Value};
use std::ops::Range;

/// Result of a select: flat rows or rows grouped into sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extract<'a> {
    Tokens(Vec<Row<'a>>),
    Sentences(Vec<Vec<Row<'a>>>),
}

impl<'a> Extract<'a> {
    /// Flatten into a single row sequence
    pub fn into_tokens(self) -> Vec<Row<'a>> {
        match self {
            Extract::Tokens(rows) => rows,
            Extract::Sentences(sents) => sents.into_iter().flatten().collect(),
        }
    }
}

/// Merge the ranges of the requested documents into ascending, disjoint ranges
///
/// Document ranges never overlap, so ordering them by start and coalescing
/// neighbours is enough; individual positions are never sorted. Naming a
/// document twice does not repeat its tokens.
pub fn merged_ranges(store: &ColumnStore, documents: Option<&[&str]>) -> Result<Vec<Range<usize>>> {
    let Some(documents) = documents else {
        return Ok(vec![0..store.len()]);
    };

    let mut ranges = Vec::with_capacity(documents.len());
    for &id in documents {
        let range = store
            .document_range(id)
            .ok_or_else(|| CorpusError::UnknownDocument(id.to_string()))?;
        if !range.is_empty() {
            ranges.push(range);
        }
    }
    ranges.sort_unstable_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    Ok(merged)
}

/// Extracts rows from a column store
#[derive(Debug, Clone, Copy)]
pub struct ViewExtractor<'s> {
    store: &'s ColumnStore,
    drop_single_token_trailing: bool,
    reject_empty_selection: bool,
}

impl<'s> ViewExtractor<'s> {
    pub fn new(store: &'s ColumnStore) -> Self {
        Self {
            store,
            drop_single_token_trailing: true,
            reject_empty_selection: false,
        }
    }

    /// Keep or drop a trailing one-token sentence when grouping
    pub fn drop_single_token_trailing(mut self, drop: bool) -> Self {
        self.drop_single_token_trailing = drop;
        self
    }

    /// Fail on an empty field selection instead of yielding empty rows
    pub fn reject_empty_selection(mut self, reject: bool) -> Self {
        self.reject_empty_selection = reject;
        self
    }

    /// Select fields, flat or grouped into sentences
    pub fn select(
        &self,
        fields: FieldSet,
        group_by_sentence: bool,
        documents: Option<&[&str]>,
    ) -> Result<Extract<'s>> {
        if group_by_sentence {
            self.sentences(fields, documents).map(Extract::Sentences)
        } else {
            self.tokens(fields, documents).map(Extract::Tokens)
        }
    }

    /// One row per token, no boundary logic
    pub fn tokens(&self, fields: FieldSet, documents: Option<&[&str]>) -> Result<Vec<Row<'s>>> {
        self.check_fields(fields)?;
        let ranges = merged_ranges(self.store, documents)?;
        ranges
            .into_iter()
            .flatten()
            .map(|pos| self.row(fields, pos))
            .collect()
    }

    /// Rows grouped into sentences by token-index resets
    pub fn sentences(
        &self,
        fields: FieldSet,
        documents: Option<&[&str]>,
    ) -> Result<Vec<Vec<Row<'s>>>> {
        self.check_fields(fields)?;
        self.sentences_with(documents, |pos| self.row(fields, pos))
    }

    /// Sentences over the requested documents, mapping each position through `token`
    pub fn sentences_with<T>(
        &self,
        documents: Option<&[&str]>,
        token: impl FnMut(usize) -> Result<T>,
    ) -> Result<Vec<Vec<T>>> {
        let ranges = merged_ranges(self.store, documents)?;
        self.group_sentences(ranges.into_iter().flatten(), token)
    }

    /// Group positions into sentences, mapping each position through `row`
    pub fn group_sentences<T>(
        &self,
        positions: impl IntoIterator<Item = usize>,
        mut row: impl FnMut(usize) -> Result<T>,
    ) -> Result<Vec<Vec<T>>> {
        let mut sentences = Vec::new();
        let mut current = Vec::new();
        let mut last_index = 0;

        for pos in positions {
            let index = self.store.token_index(pos);
            if index < last_index && !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            current.push(row(pos)?);
            last_index = index;
        }

        let keep_trailing = if self.drop_single_token_trailing {
            current.len() > 1
        } else {
            !current.is_empty()
        };
        if keep_trailing {
            sentences.push(current);
        }
        Ok(sentences)
    }

    fn check_fields(&self, fields: FieldSet) -> Result<()> {
        if self.reject_empty_selection && fields.is_empty() {
            Err(CorpusError::EmptyFieldSelection)
        } else {
            Ok(())
        }
    }

    /// One field of the token at `pos`
    ///
    /// Only the optimized tag column can be shorter than the store, so a
    /// missing value is a tag-count mismatch.
    #[inline]
    pub fn value(&self, field: Field, pos: usize) -> Result<Value<'s>> {
        let store = self.store;
        store
            .value(field, pos)
            .ok_or_else(|| CorpusError::TagCountMismatch {
                tags: store.optimized_tag_count(),
                tokens: store.len(),
            })
    }

    #[inline]
    fn row(&self, fields: FieldSet, pos: usize) -> Result<Row<'s>> {
        let values = fields
            .iter()
            .map(|field| self.value(field, pos))
            .collect::<Result<Vec<_>>>()?;
        Ok(Row::new(fields, values))
    }
}
