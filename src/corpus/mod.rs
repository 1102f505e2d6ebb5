//! Read-only chunk and metadata store.
//!
//! The corpus is built offline: `chunks.json` holds the chunk texts (array
//! position = chunk id, matching the vector index point ids) and
//! `metadata.json` holds one [`ChunkMetadata`] per chunk. Both are loaded
//! once at startup and shared immutably for the process lifetime; a missing
//! or inconsistent file is fatal, never a per-request condition.

pub mod error;
pub mod model;

pub use error::CorpusError;
pub use model::{ChunkMetadata, PUBLICATION_DATE_FORMAT, PublicationType};

use std::fs;
use std::path::Path;

use tracing::info;

/// File name for chunk texts inside the corpus directory.
pub const CHUNKS_FILE: &str = "chunks.json";
/// File name for chunk metadata inside the corpus directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Immutable chunk/metadata store, indexed by chunk id.
#[derive(Debug)]
pub struct CorpusStore {
    chunks: Vec<String>,
    metadata: Vec<ChunkMetadata>,
}

impl CorpusStore {
    /// Loads `chunks.json` and `metadata.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, CorpusError> {
        let chunks: Vec<String> = read_json(&dir.join(CHUNKS_FILE))?;
        let metadata: Vec<ChunkMetadata> = read_json(&dir.join(METADATA_FILE))?;

        let store = Self::from_parts(chunks, metadata)?;
        info!(chunks = store.len(), dir = %dir.display(), "Corpus loaded");
        Ok(store)
    }

    /// Builds a store from already-parsed parts, enforcing the 1:1 mapping.
    pub fn from_parts(
        chunks: Vec<String>,
        metadata: Vec<ChunkMetadata>,
    ) -> Result<Self, CorpusError> {
        if chunks.len() != metadata.len() {
            return Err(CorpusError::LengthMismatch {
                chunks: chunks.len(),
                metadata: metadata.len(),
            });
        }
        Ok(Self { chunks, metadata })
    }

    /// Number of chunks in the corpus.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if the corpus holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk text by id.
    pub fn chunk_text(&self, id: u64) -> Option<&str> {
        self.chunks.get(id as usize).map(String::as_str)
    }

    /// Chunk metadata by id.
    pub fn metadata(&self, id: u64) -> Option<&ChunkMetadata> {
        self.metadata.get(id as usize)
    }

    /// Ids of all chunks whose publication type is in `types`.
    ///
    /// The result drives the index-side id filter; an empty result means the
    /// type allow-list excludes the whole corpus.
    pub fn ids_matching(&self, types: &[PublicationType]) -> Vec<u64> {
        self.metadata
            .iter()
            .enumerate()
            .filter(|(_, meta)| types.contains(&meta.publication_type))
            .map(|(idx, _)| idx as u64)
            .collect()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::FileMissing {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path).map_err(|e| CorpusError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&raw).map_err(|e| CorpusError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(publication_type: PublicationType, date: &str) -> ChunkMetadata {
        ChunkMetadata {
            title: "Title".to_string(),
            article_url: "http://example.org/a".to_string(),
            pdf_url: "http://example.org/a.pdf".to_string(),
            publication_type,
            publication_date: date.to_string(),
            summary: "Summary".to_string(),
        }
    }

    #[test]
    fn from_parts_rejects_length_mismatch() {
        let err = CorpusStore::from_parts(
            vec!["one".to_string()],
            vec![
                meta(PublicationType::Report, "Jan 03, 2025, 10:15:00 AM"),
                meta(PublicationType::News, "Jan 04, 2025, 10:15:00 AM"),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CorpusError::LengthMismatch {
                chunks: 1,
                metadata: 2
            }
        ));
    }

    #[test]
    fn ids_matching_filters_by_type() {
        let store = CorpusStore::from_parts(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                meta(PublicationType::Report, "Jan 03, 2025, 10:15:00 AM"),
                meta(PublicationType::News, "Jan 04, 2025, 10:15:00 AM"),
                meta(PublicationType::Report, "Jan 05, 2025, 10:15:00 AM"),
            ],
        )
        .unwrap();

        assert_eq!(store.ids_matching(&[PublicationType::Report]), vec![0, 2]);
        assert_eq!(store.ids_matching(&[PublicationType::News]), vec![1]);
        assert!(store.ids_matching(&[PublicationType::Briefing]).is_empty());
    }

    #[test]
    fn publication_date_parses_corpus_format() {
        let m = meta(PublicationType::Report, "Jan 03, 2025, 10:15:00 AM");
        let parsed = m.parsed_date().expect("date should parse");
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2025-01-03");
        assert_eq!(m.display_date(), "January 03, 2025");
    }

    #[test]
    fn unparseable_date_is_kept_verbatim() {
        let m = meta(PublicationType::Report, "Unknown Date");
        assert!(m.parsed_date().is_none());
        assert_eq!(m.display_date(), "Unknown Date");
    }

    #[test]
    fn metadata_deserialises_corpus_keys_with_defaults() {
        let m: ChunkMetadata = serde_json::from_str(
            r#"{"Title": "Grid Report", "Publication Type": "Press Release"}"#,
        )
        .unwrap();
        assert_eq!(m.title, "Grid Report");
        assert_eq!(m.publication_type, PublicationType::PressRelease);
        assert_eq!(m.article_url, "No URL");
        assert_eq!(m.publication_date, "Unknown Date");

        let m: ChunkMetadata =
            serde_json::from_str(r#"{"Publication Type": "Some Future Type"}"#).unwrap();
        assert_eq!(m.publication_type, PublicationType::Unknown);
        assert_eq!(m.title, "Unknown Title");
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = CorpusStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, CorpusError::FileMissing { .. }));
    }

    #[test]
    fn load_round_trips_written_corpus() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CHUNKS_FILE),
            serde_json::to_string(&vec!["chunk one", "chunk two"]).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join(METADATA_FILE),
            serde_json::to_string(&vec![
                meta(PublicationType::Report, "Jan 03, 2025, 10:15:00 AM"),
                meta(PublicationType::News, "Feb 11, 2024, 09:00:00 PM"),
            ])
            .unwrap(),
        )
        .unwrap();

        let store = CorpusStore::load(dir.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.chunk_text(1), Some("chunk two"));
        assert_eq!(
            store.metadata(1).unwrap().publication_type,
            PublicationType::News
        );
        assert!(store.chunk_text(2).is_none());
    }
}
