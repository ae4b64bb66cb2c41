//! Corpus sources
//!
//! Resolves document ids to line streams. Documents live either in memory
//! (mostly for tests and small corpora) or as files under a root directory.
//! Files ending in `.gz` are decompressed on the fly.

use crate::error::{CorpusError, Result};
use flate2::read::GzDecoder;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Where the documents of a corpus come from
#[derive(Debug, Clone)]
pub enum CorpusSource {
    /// In-memory documents keyed by id
    Memory(BTreeMap<String, String>),
    /// Files under `root`, addressed by their path relative to it
    Directory { root: PathBuf, fileids: Vec<String> },
}

impl CorpusSource {
    /// Create from in-memory `(id, text)` pairs
    pub fn from_documents<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Memory(
            documents
                .into_iter()
                .map(|(id, text)| (id.into(), text.into()))
                .collect(),
        )
    }

    /// Create from explicit file ids relative to `root`
    pub fn from_dir(root: impl AsRef<Path>, fileids: Vec<String>) -> Self {
        Self::Directory {
            root: root.as_ref().to_path_buf(),
            fileids,
        }
    }

    /// Create from a glob pattern evaluated relative to `root`
    ///
    /// Only regular files are kept. Ids are sorted for deterministic loading.
    pub fn from_glob(root: impl AsRef<Path>, pattern: &str) -> std::result::Result<Self, glob::PatternError> {
        let root = root.as_ref();
        let full = root.join(pattern);
        let mut fileids: Vec<String> = glob::glob(&full.to_string_lossy())?
            .filter_map(std::result::Result::ok)
            .filter(|path| path.is_file())
            .filter_map(|path| {
                path.strip_prefix(root)
                    .ok()
                    .map(|rel| rel.to_string_lossy().into_owned())
            })
            .collect();
        fileids.sort();
        Ok(Self::from_dir(root, fileids))
    }

    /// All document ids known to the source, in sorted order
    pub fn fileids(&self) -> Vec<String> {
        match self {
            CorpusSource::Memory(documents) => documents.keys().cloned().collect(),
            CorpusSource::Directory { fileids, .. } => {
                let mut ids = fileids.clone();
                ids.sort();
                ids.dedup();
                ids
            }
        }
    }

    /// Open a document as a buffered line stream
    ///
    /// Directory sources resolve any id under the root, listed or not, so
    /// auxiliary files can be opened alongside the documents.
    pub fn open(&self, document: &str) -> Result<Box<dyn BufRead + '_>> {
        match self {
            CorpusSource::Memory(documents) => match documents.get(document) {
                Some(text) => Ok(Box::new(text.as_bytes())),
                None => Err(CorpusError::MissingDocument {
                    document: document.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "no such in-memory document",
                    ),
                }),
            },
            CorpusSource::Directory { root, .. } => {
                let path = root.join(document);
                let file = File::open(&path).map_err(|source| CorpusError::MissingDocument {
                    document: document.to_string(),
                    source,
                })?;
                if document.ends_with(".gz") {
                    Ok(Box::new(BufReader::new(GzDecoder::new(file))))
                } else {
                    Ok(Box::new(BufReader::new(file)))
                }
            }
        }
    }

    /// Read a whole document into a string
    pub fn raw(&self, document: &str) -> Result<String> {
        let mut text = String::new();
        self.open(document)?
            .read_to_string(&mut text)
            .map_err(|source| CorpusError::Io {
                document: document.to_string(),
                source,
            })?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::{TempDir, tempdir};

    fn create_test_files(contents: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (filename, content) in contents {
            let mut file = fs::File::create(dir.path().join(filename)).unwrap();
            write!(file, "{}", content).unwrap();
        }
        dir
    }

    #[test]
    fn test_memory_source() {
        let source = CorpusSource::from_documents([("b.conll", "2\n"), ("a.conll", "1\n")]);
        assert_eq!(source.fileids(), vec!["a.conll", "b.conll"]);
        assert_eq!(source.raw("a.conll").unwrap(), "1\n");
    }

    #[test]
    fn test_memory_missing() {
        let source = CorpusSource::from_documents([("a", "x")]);
        assert!(matches!(
            source.open("nope"),
            Err(CorpusError::MissingDocument { .. })
        ));
    }

    #[test]
    fn test_directory_source() {
        let dir = create_test_files(&[("doc.conll", "hello\n")]);
        let source = CorpusSource::from_dir(dir.path(), vec!["doc.conll".to_string()]);
        assert_eq!(source.raw("doc.conll").unwrap(), "hello\n");
        assert!(matches!(
            source.raw("missing.conll"),
            Err(CorpusError::MissingDocument { .. })
        ));
    }

    #[test]
    fn test_glob_sorted_and_filtered() {
        let dir = create_test_files(&[
            ("b.conll", ""),
            ("a.conll", ""),
            ("optimized.tags", ""),
        ]);
        let source = CorpusSource::from_glob(dir.path(), "*.conll").unwrap();
        assert_eq!(source.fileids(), vec!["a.conll", "b.conll"]);
    }

    #[test]
    fn test_gzip_document() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let dir = tempdir().unwrap();
        let file = fs::File::create(dir.path().join("doc.conll.gz")).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b"1\tx\n").unwrap();
        encoder.finish().unwrap();

        let source = CorpusSource::from_dir(dir.path(), vec!["doc.conll.gz".to_string()]);
        assert_eq!(source.raw("doc.conll.gz").unwrap(), "1\tx\n");
    }
}
