use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading the corpus at startup.
///
/// All of these are fatal: the pipeline must not serve requests without a
/// fully loaded chunk/metadata store.
pub enum CorpusError {
    /// A corpus file is missing. The corpus is built offline; there is no
    /// fallback at serving time.
    #[error("corpus file not found: {path} (build the corpus before serving)")]
    FileMissing { path: PathBuf },

    /// A corpus file could not be read.
    #[error("failed to read corpus file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A corpus file could not be parsed.
    #[error("failed to parse corpus file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Chunk and metadata files disagree on length; ids would not map 1:1.
    #[error("corpus length mismatch: {chunks} chunks vs {metadata} metadata entries")]
    LengthMismatch { chunks: usize, metadata: usize },
}
