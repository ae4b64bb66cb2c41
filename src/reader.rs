//! Treebank reader
//!
//! [`NdtReader`] loads every document of a corpus into one column store at
//! construction time and answers read-only queries against it afterwards.
//! All views take an optional document filter; `None` means the whole corpus.

use crate::columns::ColumnStore;
use crate::config::ReaderConfig;
use crate::error::{CorpusError, Result};
use crate::field::{Field, FieldSet, Row, Value};
use crate::graph::{DependencyGraph, DependencyGraphBuilder, GraphBuilder};
use crate::parsed::{Tagset, build_parsed_sentences, parsable_sentences};
use crate::source::CorpusSource;
use crate::view::{Extract, ViewExtractor};
use std::ops::Range;
use tracing::warn;

/// Reader for a tab-separated dependency treebank
#[derive(Debug)]
pub struct NdtReader {
    source: CorpusSource,
    fileids: Vec<String>,
    store: ColumnStore,
    config: ReaderConfig,
}

impl NdtReader {
    /// Load a corpus with the default configuration
    pub fn new(source: CorpusSource) -> Result<Self> {
        Self::with_config(source, ReaderConfig::default())
    }

    /// Load a corpus
    ///
    /// Documents are loaded in sorted id order, then the optimized tags (if
    /// configured). Any error aborts the whole load.
    pub fn with_config(source: CorpusSource, config: ReaderConfig) -> Result<Self> {
        config.validate()?;

        let documents: Vec<String> = source
            .fileids()
            .into_iter()
            .filter(|id| config.optimized_tags.as_deref() != Some(id.as_str()))
            .collect();
        let store = ColumnStore::build(&source, &documents, config.optimized_tags.as_deref())?;
        let fileids = store.documents().map(|(id, _)| id.to_string()).collect();

        if config.optimized_tags.is_some() {
            if let Err(e) = store.check_tag_alignment() {
                if config.strict_tag_count {
                    return Err(e);
                }
                warn!(error = %e, "Optimized tags are misaligned with the corpus");
            }
        }

        Ok(Self {
            source,
            fileids,
            store,
            config,
        })
    }

    /// Loaded document ids, in load order
    pub fn fileids(&self) -> &[String] {
        &self.fileids
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn store(&self) -> &ColumnStore {
        &self.store
    }

    /// Total token count
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn document_range(&self, document: &str) -> Option<Range<usize>> {
        self.store.document_range(document)
    }

    /// A view extractor honouring the reader configuration
    pub fn extractor(&self) -> ViewExtractor<'_> {
        ViewExtractor::new(&self.store)
            .drop_single_token_trailing(self.config.drop_single_token_trailing_sentence)
            .reject_empty_selection(self.config.reject_empty_selection)
    }

    /// Select fields, flat or grouped into sentences
    pub fn select(
        &self,
        fields: FieldSet,
        group_by_sentence: bool,
        documents: Option<&[&str]>,
    ) -> Result<Extract<'_>> {
        self.extractor().select(fields, group_by_sentence, documents)
    }

    /// Raw text of the given documents, concatenated
    pub fn raw(&self, documents: Option<&[&str]>) -> Result<String> {
        let ids: Vec<&str> = match documents {
            Some(ids) => ids.to_vec(),
            None => self.fileids.iter().map(String::as_str).collect(),
        };
        let mut text = String::new();
        for id in ids {
            if self.store.document_range(id).is_none() {
                return Err(CorpusError::UnknownDocument(id.to_string()));
            }
            text.push_str(&self.source.raw(id)?);
        }
        Ok(text)
    }

    fn column(&self, field: Field, documents: Option<&[&str]>) -> Result<Vec<Value<'_>>> {
        let rows = self.extractor().tokens(field.into(), documents)?;
        Ok(rows.iter().filter_map(Row::single).collect())
    }

    fn str_column(&self, field: Field, documents: Option<&[&str]>) -> Result<Vec<&str>> {
        Ok(self
            .column(field, documents)?
            .into_iter()
            .filter_map(|v| v.as_str())
            .collect())
    }

    fn int_column(&self, field: Field, documents: Option<&[&str]>) -> Result<Vec<i64>> {
        Ok(self
            .column(field, documents)?
            .into_iter()
            .filter_map(|v| v.as_int())
            .collect())
    }

    pub fn token_indexes(&self, documents: Option<&[&str]>) -> Result<Vec<i64>> {
        self.int_column(Field::Index, documents)
    }

    pub fn words(&self, documents: Option<&[&str]>) -> Result<Vec<&str>> {
        self.str_column(Field::Word, documents)
    }

    pub fn lemmas(&self, documents: Option<&[&str]>) -> Result<Vec<&str>> {
        self.str_column(Field::Lemma, documents)
    }

    pub fn pos(&self, documents: Option<&[&str]>) -> Result<Vec<&str>> {
        self.str_column(Field::Tag, documents)
    }

    pub fn morph_feats(&self, documents: Option<&[&str]>) -> Result<Vec<&str>> {
        self.str_column(Field::Morph, documents)
    }

    pub fn head_indexes(&self, documents: Option<&[&str]>) -> Result<Vec<i64>> {
        self.int_column(Field::Head, documents)
    }

    pub fn dep_rels(&self, documents: Option<&[&str]>) -> Result<Vec<&str>> {
        self.str_column(Field::Dep, documents)
    }

    pub fn opt_pos(&self, documents: Option<&[&str]>) -> Result<Vec<&str>> {
        self.str_column(Field::OptimizedTag, documents)
    }

    /// Sentences as word lists
    pub fn sents(&self, documents: Option<&[&str]>) -> Result<Vec<Vec<&str>>> {
        let sents = self.extractor().sentences(Field::Word.into(), documents)?;
        Ok(sents
            .iter()
            .map(|sent| {
                sent.iter()
                    .filter_map(|row| row.single().and_then(|v| v.as_str()))
                    .collect()
            })
            .collect())
    }

    /// `(word, tag)` rows
    pub fn tagged_words(&self, tagset: Tagset, documents: Option<&[&str]>) -> Result<Vec<Row<'_>>> {
        self.extractor().tokens(Field::Word | tagset.field(), documents)
    }

    /// `(word, tag)` rows grouped into sentences
    pub fn tagged_sents(
        &self,
        tagset: Tagset,
        documents: Option<&[&str]>,
    ) -> Result<Vec<Vec<Row<'_>>>> {
        self.extractor().sentences(Field::Word | tagset.field(), documents)
    }

    /// `(word, lemma)` rows
    pub fn lemma_words(&self, documents: Option<&[&str]>) -> Result<Vec<Row<'_>>> {
        self.extractor().tokens(Field::Word | Field::Lemma, documents)
    }

    pub fn lemma_sents(&self, documents: Option<&[&str]>) -> Result<Vec<Vec<Row<'_>>>> {
        self.extractor().sentences(Field::Word | Field::Lemma, documents)
    }

    /// `(word, morph)` rows
    pub fn morph_words(&self, documents: Option<&[&str]>) -> Result<Vec<Row<'_>>> {
        self.extractor().tokens(Field::Word | Field::Morph, documents)
    }

    pub fn morph_sents(&self, documents: Option<&[&str]>) -> Result<Vec<Vec<Row<'_>>>> {
        self.extractor().sentences(Field::Word | Field::Morph, documents)
    }

    /// `word<TAB>tag<TAB>head` blocks, one per sentence
    pub fn parsable_blocks(&self, tagset: Tagset, documents: Option<&[&str]>) -> Result<Vec<String>> {
        parsable_sentences(&self.extractor(), tagset, documents)
    }

    /// Dependency graphs, one per sentence
    pub fn parsed_sents(
        &self,
        tagset: Tagset,
        documents: Option<&[&str]>,
    ) -> Result<Vec<DependencyGraph>> {
        self.parsed_sents_with(&DependencyGraphBuilder, tagset, documents)
    }

    /// Parse structures from a caller-supplied builder
    pub fn parsed_sents_with<B: GraphBuilder>(
        &self,
        builder: &B,
        tagset: Tagset,
        documents: Option<&[&str]>,
    ) -> Result<Vec<B::Graph>> {
        build_parsed_sentences(&self.extractor(), builder, tagset, documents)
    }
}
