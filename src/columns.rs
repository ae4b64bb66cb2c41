//! Column store
//!
//! Parses treebank rows into parallel per-token columns. Every document is
//! appended to the same columns and remembered as a half-open range of
//! absolute token positions.
//!
//! Row layout (tab separated, extra fields ignored):
//! `index word lemma coarse_pos fine_pos morph head dep_rel`
//!
//! The fine-grained POS column is not stored; in the source data it repeats
//! the coarse tag.

use crate::bytes::{is_blank, leading_fields, parse_int};
use crate::error::{CorpusError, Result};
use crate::field::{Field, Value};
use crate::source::CorpusSource;
use lasso::{Rodeo, RodeoReader, Spur};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::ops::Range;
use tracing::{debug, info};

/// Number of leading fields every row must carry
pub const ROW_FIELDS: usize = 8;

/// Immutable columnar token store
///
/// All columns have the same length. Document ranges are disjoint and, taken
/// in load order, cover `0..len()` without gaps.
#[derive(Debug)]
pub struct ColumnStore {
    pool: RodeoReader,
    token_index: Vec<i64>,
    word_form: Vec<Spur>,
    lemma: Vec<Spur>,
    coarse_pos: Vec<Spur>,
    morph_feat: Vec<Spur>,
    head_index: Vec<i64>,
    dep_rel: Vec<Spur>,
    optimized_tags: Vec<Spur>,
    documents: BTreeMap<String, Range<usize>>,
    load_order: Vec<String>,
}

impl ColumnStore {
    /// Build a store from the given documents, loaded in sorted id order,
    /// then attach the optimized tags if a tag document is named
    pub fn build(
        source: &CorpusSource,
        documents: &[String],
        optimized_tags: Option<&str>,
    ) -> Result<Self> {
        let mut ids: Vec<&String> = documents.iter().collect();
        ids.sort();
        ids.dedup();

        let mut builder = ColumnStoreBuilder::new();
        for id in ids {
            builder.add_document(id, source.open(id)?)?;
        }
        if let Some(tags) = optimized_tags {
            builder.load_optimized_tags(tags, source.open(tags)?)?;
        }
        Ok(builder.finish())
    }

    /// Total token count
    #[inline]
    pub fn len(&self) -> usize {
        self.token_index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_index.is_empty()
    }

    /// Token range of a loaded document
    pub fn document_range(&self, document: &str) -> Option<Range<usize>> {
        self.documents.get(document).cloned()
    }

    /// Document ids with their ranges, in load order
    pub fn documents(&self) -> impl Iterator<Item = (&str, Range<usize>)> + '_ {
        self.load_order
            .iter()
            .map(|id| (id.as_str(), self.documents[id].clone()))
    }

    /// Number of optimized tags loaded
    pub fn optimized_tag_count(&self) -> usize {
        self.optimized_tags.len()
    }

    /// Check that every token has exactly one optimized tag
    pub fn check_tag_alignment(&self) -> Result<()> {
        if self.optimized_tags.len() == self.len() {
            Ok(())
        } else {
            Err(CorpusError::TagCountMismatch {
                tags: self.optimized_tags.len(),
                tokens: self.len(),
            })
        }
    }

    #[inline]
    pub fn token_index(&self, pos: usize) -> i64 {
        self.token_index[pos]
    }

    pub fn token_indexes(&self) -> &[i64] {
        &self.token_index
    }

    pub fn head_indexes(&self) -> &[i64] {
        &self.head_index
    }

    #[inline]
    fn resolve(&self, sym: &Spur) -> &str {
        self.pool.resolve(sym)
    }

    /// Value of one field at an absolute position
    ///
    /// Returns `None` past the end of the column, which for optimized tags
    /// means the tag file was shorter than the corpus.
    #[inline]
    pub fn value(&self, field: Field, pos: usize) -> Option<Value<'_>> {
        let value = match field {
            Field::Index => Value::Int(*self.token_index.get(pos)?),
            Field::Word => Value::Str(self.resolve(self.word_form.get(pos)?)),
            Field::Lemma => Value::Str(self.resolve(self.lemma.get(pos)?)),
            Field::Tag => Value::Str(self.resolve(self.coarse_pos.get(pos)?)),
            Field::Morph => Value::Str(self.resolve(self.morph_feat.get(pos)?)),
            Field::Head => Value::Int(*self.head_index.get(pos)?),
            Field::Dep => Value::Str(self.resolve(self.dep_rel.get(pos)?)),
            Field::OptimizedTag => Value::Str(self.resolve(self.optimized_tags.get(pos)?)),
        };
        Some(value)
    }
}

/// Accumulates documents and optimized tags into a [`ColumnStore`]
///
/// A builder is consumed by [`finish`](Self::finish), so a store can never
/// be filled twice.
#[derive(Debug, Default)]
pub struct ColumnStoreBuilder {
    pool: Rodeo,
    token_index: Vec<i64>,
    word_form: Vec<Spur>,
    lemma: Vec<Spur>,
    coarse_pos: Vec<Spur>,
    morph_feat: Vec<Spur>,
    head_index: Vec<i64>,
    dep_rel: Vec<Spur>,
    optimized_tags: Vec<Spur>,
    tags_source: Option<String>,
    documents: BTreeMap<String, Range<usize>>,
    load_order: Vec<String>,
}

impl ColumnStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every row of one document and record its range
    pub fn add_document(&mut self, document: &str, reader: impl BufRead) -> Result<Range<usize>> {
        if self.documents.contains_key(document) {
            return Err(CorpusError::DuplicateDocument(document.to_string()));
        }

        let start = self.token_index.len();
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CorpusError::Io {
                document: document.to_string(),
                source,
            })?;
            if is_blank(&line) {
                continue;
            }
            self.push_row(document, line_idx + 1, &line)?;
        }
        let end = self.token_index.len();

        debug!(document, tokens = end - start, "Loaded document");
        self.documents.insert(document.to_string(), start..end);
        self.load_order.push(document.to_string());
        Ok(start..end)
    }

    fn push_row(&mut self, document: &str, line_num: usize, line: &str) -> Result<()> {
        let malformed = |reason: String| CorpusError::MalformedRow {
            document: document.to_string(),
            line: line_num,
            reason,
        };

        let [index, word, lemma, coarse_pos, _fine_pos, morph, head, dep_rel] =
            leading_fields::<ROW_FIELDS>(line).map_err(|found| {
                malformed(format!(
                    "expected at least {} fields, found {}",
                    ROW_FIELDS, found
                ))
            })?;
        let index =
            parse_int(index).ok_or_else(|| malformed(format!("invalid token index {:?}", index)))?;
        let head =
            parse_int(head).ok_or_else(|| malformed(format!("invalid head index {:?}", head)))?;

        self.token_index.push(index);
        self.word_form.push(self.pool.get_or_intern(word));
        self.lemma.push(self.pool.get_or_intern(lemma));
        self.coarse_pos.push(self.pool.get_or_intern(coarse_pos));
        self.morph_feat.push(self.pool.get_or_intern(morph));
        self.head_index.push(head);
        self.dep_rel.push(self.pool.get_or_intern(dep_rel));
        Ok(())
    }

    /// Load one optimized tag per non-blank line, in file order
    ///
    /// Tags are aligned to tokens by absolute position only. They can be
    /// loaded once per builder; a second call fails and leaves the first set
    /// untouched.
    pub fn load_optimized_tags(&mut self, document: &str, reader: impl BufRead) -> Result<usize> {
        if let Some(loaded_from) = &self.tags_source {
            return Err(CorpusError::TagsAlreadyLoaded(loaded_from.clone()));
        }

        let mut tags = Vec::new();
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CorpusError::Io {
                document: document.to_string(),
                source,
            })?;
            if is_blank(&line) {
                continue;
            }
            let tag = line.trim();
            if tag.is_empty() {
                return Err(CorpusError::MalformedRow {
                    document: document.to_string(),
                    line: line_idx + 1,
                    reason: "empty optimized tag".to_string(),
                });
            }
            tags.push(self.pool.get_or_intern(tag));
        }

        let loaded = tags.len();
        debug!(document, tags = loaded, "Loaded optimized tags");
        self.optimized_tags = tags;
        self.tags_source = Some(document.to_string());
        Ok(loaded)
    }

    /// Current token count
    pub fn len(&self) -> usize {
        self.token_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_index.is_empty()
    }

    /// Freeze the columns into an immutable store
    pub fn finish(self) -> ColumnStore {
        info!(
            documents = self.documents.len(),
            tokens = self.token_index.len(),
            optimized_tags = self.optimized_tags.len(),
            distinct_strings = self.pool.len(),
            "Column store built"
        );
        ColumnStore {
            pool: self.pool.into_reader(),
            token_index: self.token_index,
            word_form: self.word_form,
            lemma: self.lemma,
            coarse_pos: self.coarse_pos,
            morph_feat: self.morph_feat,
            head_index: self.head_index,
            dep_rel: self.dep_rel,
            optimized_tags: self.optimized_tags,
            documents: self.documents,
            load_order: self.load_order,
        }
    }
}
