use std::path::PathBuf;

/// Credential storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage I/O error on {}: {source}", path.display())]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Backing file exists but does not hold a JSON object of strings
    #[error("corrupt storage file {}: {source}", path.display())]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// Decode failure
        #[source]
        source: serde_json::Error,
    },

    /// A previous writer panicked while holding the slot lock
    #[error("storage lock poisoned")]
    Poisoned,
}
