//! Parse-structure building
//!
//! Folds the word, tag and head columns of each sentence into a
//! `word<TAB>tag<TAB>head` block and hands the block to a [`GraphBuilder`].

use crate::error::{CorpusError, Result};
use crate::field::Field;
use crate::graph::GraphBuilder;
use crate::view::ViewExtractor;
use std::str::FromStr;

/// Which tag column to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tagset {
    /// The coarse POS column of the treebank
    #[default]
    Primary,
    /// The positionally aligned optimized tags
    Optimized,
}

impl Tagset {
    pub fn field(self) -> Field {
        match self {
            Tagset::Primary => Field::Tag,
            Tagset::Optimized => Field::OptimizedTag,
        }
    }
}

impl FromStr for Tagset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "primary" | "default" | "pos" => Ok(Tagset::Primary),
            "opt" | "optimized" => Ok(Tagset::Optimized),
            other => Err(format!("unknown tagset: {}", other)),
        }
    }
}

/// One `word<TAB>tag<TAB>head` block per sentence, in position order
///
/// A sentence whose tag is missing (optimized tags shorter than the corpus)
/// fails the whole call with `TagCountMismatch`.
pub fn parsable_sentences(
    extractor: &ViewExtractor<'_>,
    tagset: Tagset,
    documents: Option<&[&str]>,
) -> Result<Vec<String>> {
    let tag = tagset.field();
    let sentences = extractor.sentences_with(documents, |pos| {
        Ok(format!(
            "{}\t{}\t{}\n",
            extractor.value(Field::Word, pos)?,
            extractor.value(tag, pos)?,
            extractor.value(Field::Head, pos)?
        ))
    })?;
    Ok(sentences.into_iter().map(|lines| lines.concat()).collect())
}

/// Build one parse structure per sentence
///
/// Builder failures are returned with the position of the offending
/// sentence; nothing is retried.
pub fn build_parsed_sentences<B: GraphBuilder>(
    extractor: &ViewExtractor<'_>,
    builder: &B,
    tagset: Tagset,
    documents: Option<&[&str]>,
) -> Result<Vec<B::Graph>> {
    parsable_sentences(extractor, tagset, documents)?
        .iter()
        .enumerate()
        .map(|(sentence, block)| {
            builder
                .build(block)
                .map_err(|source| CorpusError::Graph { sentence, source })
        })
        .collect()
}
