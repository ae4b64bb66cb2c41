//! `ndt`: print views of a treebank corpus
//!
//! Run with: `cargo run --bin ndt -- --root corpus/ select --fields word,tag,head --sentences`

use clap::{Parser, Subcommand};
use ndtreader::{CorpusSource, Field, FieldSet, NdtReader, ReaderConfig, Tagset};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ndt", about = "Read a tab-separated dependency treebank")]
struct Cli {
    /// Corpus root directory
    #[arg(long, env = "NDT_ROOT")]
    root: PathBuf,

    /// Glob selecting the documents, relative to the root
    #[arg(long, default_value = "*.conll")]
    glob: String,

    /// Optimized tag file, relative to the root
    #[arg(long, default_value = ndtreader::config::OPTIMIZED_TAGS_FILE)]
    tags: String,

    /// Do not load optimized tags
    #[arg(long)]
    no_tags: bool,

    /// Fail if the optimized tags do not cover every token
    #[arg(long)]
    strict_tags: bool,

    /// Keep a trailing single-token sentence instead of dropping it
    #[arg(long)]
    keep_single_trailing: bool,

    /// Fail on an empty field selection instead of printing empty rows
    #[arg(long)]
    reject_empty: bool,

    /// Restrict output to these documents (repeatable)
    #[arg(long = "doc")]
    documents: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List documents with their token ranges
    Documents,
    /// Print selected fields, one token per line
    Select {
        /// Comma-separated fields: index,word,lemma,tag,morph,head,dep,opt
        #[arg(long, value_delimiter = ',', default_value = "word")]
        fields: Vec<Field>,
        /// Separate sentences with a blank line
        #[arg(long)]
        sentences: bool,
    },
    /// Print the word/tag/head block of every sentence
    Parsed {
        /// primary or opt
        #[arg(long, default_value = "primary")]
        tagset: Tagset,
    },
}

impl Cli {
    fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default()
            .with_optimized_tags((!self.no_tags).then_some(self.tags.as_str()))
            .with_strict_tag_count(self.strict_tags)
            .with_drop_single_token_trailing_sentence(!self.keep_single_trailing)
            .with_reject_empty_selection(self.reject_empty)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = CorpusSource::from_glob(&cli.root, &cli.glob)?;
    let config = cli.reader_config();

    tracing::info!(root = %cli.root.display(), glob = %cli.glob, "Loading corpus");
    let reader = NdtReader::with_config(source, config)?;

    let ids: Vec<&str> = cli.documents.iter().map(String::as_str).collect();
    let documents = (!ids.is_empty()).then_some(ids.as_slice());

    match cli.command {
        Command::Documents => {
            for id in reader.fileids() {
                if let Some(range) = reader.document_range(id) {
                    println!("{}\t{}\t{}", id, range.start, range.end);
                }
            }
        }
        Command::Select { fields, sentences } => {
            let fields: FieldSet = fields.into_iter().collect();
            if sentences {
                for sentence in reader.extractor().sentences(fields, documents)? {
                    for row in sentence {
                        println!("{}", row);
                    }
                    println!();
                }
            } else {
                for row in reader.extractor().tokens(fields, documents)? {
                    println!("{}", row);
                }
            }
        }
        Command::Parsed { tagset } => {
            for block in reader.parsable_blocks(tagset, documents)? {
                println!("{}", block);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_reach_config() {
        let cli = Cli::try_parse_from([
            "ndt",
            "--root",
            "corpus",
            "--no-tags",
            "--strict-tags",
            "--keep-single-trailing",
            "--reject-empty",
            "documents",
        ])
        .unwrap();
        let config = cli.reader_config();

        assert_eq!(config.optimized_tags, None);
        assert!(config.strict_tag_count);
        assert!(!config.drop_single_token_trailing_sentence);
        assert!(config.reject_empty_selection);
    }

    #[test]
    fn test_default_flags() {
        let cli = Cli::try_parse_from(["ndt", "--root", "corpus", "select", "--fields", "word,tag"])
            .unwrap();
        let config = cli.reader_config();

        assert_eq!(config.optimized_tags.as_deref(), Some("optimized.tags"));
        assert!(config.drop_single_token_trailing_sentence);
        assert!(!config.reject_empty_selection);
        assert!(matches!(cli.command, Command::Select { ref fields, sentences: false } if fields.len() == 2));
    }
}
