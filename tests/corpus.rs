//! End-to-end behaviour of the reader over in-memory and on-disk corpora

use ndtreader::{
    CorpusError, CorpusSource, Extract, Field, FieldSet, NdtReader, ReaderConfig, Tagset, Value,
};
use std::fs;
use std::io::Write;
use tempfile::{TempDir, tempdir};

const THE_CAT: &str = "1\tThe\tthe\tDET\t_\t_\t2\tdet\n2\tcat\tcat\tNOUN\t_\t_\t0\troot\n";

fn row(index: i64, word: &str, head: i64) -> String {
    format!("{index}\t{word}\t{word}\tX\tX\t_\t{head}\tdep\n")
}

fn reader_without_tags(documents: &[(&str, String)]) -> NdtReader {
    let source = CorpusSource::from_documents(documents.iter().cloned());
    let config = ReaderConfig::default().with_optimized_tags(None);
    NdtReader::with_config(source, config).unwrap()
}

#[test]
fn test_word_tag_head_sentence() {
    let reader = reader_without_tags(&[("doc", THE_CAT.to_string())]);
    let sents = reader
        .extractor()
        .sentences(Field::Word | Field::Tag | Field::Head, None)
        .unwrap();

    assert_eq!(sents.len(), 1);
    assert_eq!(
        sents[0][0].values(),
        &[Value::Str("The"), Value::Str("DET"), Value::Int(2)]
    );
    assert_eq!(
        sents[0][1].values(),
        &[Value::Str("cat"), Value::Str("NOUN"), Value::Int(0)]
    );
}

#[test]
fn test_parsable_block() {
    let reader = reader_without_tags(&[("doc", THE_CAT.to_string())]);
    let blocks = reader.parsable_blocks(Tagset::Primary, None).unwrap();
    assert_eq!(blocks, vec!["The\tDET\t2\ncat\tNOUN\t0\n"]);

    let graphs = reader.parsed_sents(Tagset::Primary, None).unwrap();
    assert_eq!(graphs[0].to_conll(), blocks[0]);
}

#[test]
fn test_ranges_cover_corpus() {
    let reader = reader_without_tags(&[
        ("c", [row(1, "e", 0), row(2, "f", 1)].concat()),
        ("a", [row(1, "a", 0), row(2, "b", 1), row(3, "c", 1)].concat()),
        ("b", String::new()),
        ("d", row(1, "g", 0)),
    ]);

    let mut expected_start = 0;
    let mut total = 0;
    for (_, range) in reader.store().documents() {
        assert!(range.start <= range.end);
        assert_eq!(range.start, expected_start);
        expected_start = range.end;
        total += range.len();
    }
    assert_eq!(total, reader.len());
    assert_eq!(reader.document_range("b"), Some(3..3));
}

#[test]
fn test_empty_document_contributes_nothing() {
    let reader = reader_without_tags(&[
        ("a", [row(1, "a", 0), row(2, "b", 1)].concat()),
        ("b", String::new()),
    ]);
    let only_empty = Some(&["b"][..]);

    assert!(reader.words(only_empty).unwrap().is_empty());
    assert!(reader.sents(only_empty).unwrap().is_empty());
    assert!(reader.parsable_blocks(Tagset::Primary, only_empty).unwrap().is_empty());
    assert_eq!(reader.words(Some(&["a", "b"][..])).unwrap(), vec!["a", "b"]);
}

#[test]
fn test_seam_reset_matches_within_document_reset() {
    let doc_a = [row(1, "a1", 0), row(2, "a2", 1), row(3, "a3", 1)].concat();
    let doc_b = [row(1, "b1", 0), row(2, "b2", 1)].concat();

    let split = reader_without_tags(&[("a", doc_a.clone()), ("b", doc_b.clone())]);
    let joined = reader_without_tags(&[("ab", format!("{}{}", doc_a, doc_b))]);

    let across_seam = split.sents(Some(&["b", "a"][..])).unwrap();
    let within = joined.sents(None).unwrap();

    assert_eq!(across_seam, vec![vec!["a1", "a2", "a3"], vec!["b1", "b2"]]);
    assert_eq!(across_seam, within);
}

#[test]
fn test_no_reset_at_seam_merges_sentences() {
    // b continues counting upward, so nothing marks the document boundary
    let split = reader_without_tags(&[
        ("a", [row(1, "a1", 0), row(2, "a2", 1)].concat()),
        ("b", [row(3, "b3", 1), row(4, "b4", 1)].concat()),
    ]);
    let sents = split.sents(None).unwrap();
    assert_eq!(sents, vec![vec!["a1", "a2", "b3", "b4"]]);
}

#[test]
fn test_flat_equals_grouped_except_single_token_tail() {
    let doc = [
        row(1, "a", 0),
        row(2, "b", 1),
        row(1, "c", 0),
        row(2, "d", 1),
        row(3, "e", 2),
        row(1, "lonely", 0),
    ]
    .concat();
    let reader = reader_without_tags(&[("doc", doc)]);

    let flat = reader.select(FieldSet::ALL.without(Field::OptimizedTag), false, None).unwrap();
    let grouped = reader.select(FieldSet::ALL.without(Field::OptimizedTag), true, None).unwrap();
    let Extract::Tokens(flat) = flat else {
        panic!("expected flat rows");
    };
    let Extract::Sentences(grouped) = grouped else {
        panic!("expected sentences");
    };

    // The one-token trailing sentence is only missing from the grouped view
    assert_eq!(grouped.len(), 2);
    let regrouped: Vec<_> = grouped.into_iter().flatten().collect();
    assert_eq!(regrouped.len() + 1, flat.len());
    assert_eq!(regrouped.as_slice(), &flat[..flat.len() - 1]);
    assert_eq!(flat.last().unwrap().get(Field::Word), Some(Value::Str("lonely")));
}

#[test]
fn test_single_token_tail_kept_when_configured() {
    let doc = [row(1, "a", 0), row(2, "b", 1), row(1, "lonely", 0)].concat();
    let source = CorpusSource::from_documents([("doc", doc)]);
    let config = ReaderConfig::default()
        .with_optimized_tags(None)
        .with_drop_single_token_trailing_sentence(false);
    let reader = NdtReader::with_config(source, config).unwrap();

    let sents = reader.sents(None).unwrap();
    assert_eq!(sents, vec![vec!["a", "b"], vec!["lonely"]]);
}

#[test]
fn test_query_error_leaves_reader_usable() {
    let reader = reader_without_tags(&[("doc", THE_CAT.to_string())]);

    assert!(matches!(
        reader.words(Some(&["nope"][..])),
        Err(CorpusError::UnknownDocument(_))
    ));
    assert_eq!(reader.words(None).unwrap(), vec!["The", "cat"]);
}

#[test]
fn test_malformed_row_aborts_load() {
    let source = CorpusSource::from_documents([
        ("a", THE_CAT.to_string()),
        ("b", "1\tbroken\n".to_string()),
    ]);
    let config = ReaderConfig::default().with_optimized_tags(None);
    let err = NdtReader::with_config(source, config).unwrap_err();
    assert!(matches!(err, CorpusError::MalformedRow { ref document, line: 1, .. } if document == "b"));
}

#[test]
fn test_empty_selection_rejected_when_configured() {
    let source = CorpusSource::from_documents([("doc", THE_CAT)]);
    let config = ReaderConfig::default()
        .with_optimized_tags(None)
        .with_reject_empty_selection(true);
    let reader = NdtReader::with_config(source, config).unwrap();
    assert!(matches!(
        reader.select(FieldSet::EMPTY, false, None),
        Err(CorpusError::EmptyFieldSelection)
    ));
}

#[test]
fn test_reader_shared_across_threads() {
    let doc = [row(1, "a", 0), row(2, "b", 1), row(1, "c", 0), row(2, "d", 1)].concat();
    let reader = reader_without_tags(&[("doc", doc)]);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| reader.sents(None).unwrap().len()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    });
}

mod on_disk {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    /// Helper to create test files with given content
    fn create_test_files(contents: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (filename, content) in contents {
            let mut file = fs::File::create(dir.path().join(filename)).unwrap();
            write!(file, "{}", content).unwrap();
        }
        dir
    }

    #[test]
    fn test_directory_corpus_with_tags() {
        let dir = create_test_files(&[
            ("b.conll", "1\tHan\than\tPRON\tPRON\t_\t2\tSUBJ\n2\tlo\tle\tVERB\tVERB\t_\t0\tFINV\n"),
            ("a.conll", THE_CAT),
            ("optimized.tags", "det\nsubst\npron\nverb\n"),
        ]);
        let source = CorpusSource::from_glob(dir.path(), "*.conll").unwrap();
        let reader = NdtReader::new(source).unwrap();

        assert_eq!(reader.fileids(), &["a.conll", "b.conll"]);
        assert_eq!(reader.opt_pos(Some(&["b.conll"][..])).unwrap(), vec!["pron", "verb"]);

        let tagged = reader.tagged_sents(Tagset::Optimized, None).unwrap();
        assert_eq!(tagged.len(), 2);
        assert_eq!(tagged[0][1].to_string(), "cat\tsubst");
    }

    #[test]
    fn test_gzip_documents() {
        let dir = tempdir().unwrap();
        let file = fs::File::create(dir.path().join("a.conll.gz")).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(THE_CAT.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let source = CorpusSource::from_glob(dir.path(), "*.conll.gz").unwrap();
        let config = ReaderConfig::default().with_optimized_tags(None);
        let reader = NdtReader::with_config(source, config).unwrap();

        assert_eq!(reader.words(None).unwrap(), vec!["The", "cat"]);
        assert_eq!(reader.raw(None).unwrap(), THE_CAT);
    }

    #[test]
    fn test_missing_tag_file_fails_load() {
        let dir = create_test_files(&[("a.conll", THE_CAT)]);
        let source = CorpusSource::from_glob(dir.path(), "*.conll").unwrap();
        assert!(matches!(
            NdtReader::new(source),
            Err(CorpusError::MissingDocument { ref document, .. }) if document == "optimized.tags"
        ));
    }

    #[test]
    fn test_listed_but_missing_document() {
        let dir = create_test_files(&[("a.conll", THE_CAT)]);
        let source = CorpusSource::from_dir(
            dir.path(),
            vec!["a.conll".to_string(), "gone.conll".to_string()],
        );
        let config = ReaderConfig::default().with_optimized_tags(None);
        assert!(matches!(
            NdtReader::with_config(source, config),
            Err(CorpusError::MissingDocument { ref document, .. }) if document == "gone.conll"
        ));
    }
}
