use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The finished document could not be written to its destination.
    #[error("cannot write report{}: {}", display_path(.path), .source)]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read report bundle {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid report bundle: {0}")]
    Bundle(#[from] serde_json::Error),
    #[error("invalid timestamp {0:?} (expected YYYY-MM-DD HH:MM)")]
    Timestamp(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" to {}", p.display()))
        .unwrap_or_default()
}

impl Error {
    pub(crate) fn io(path: Option<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        move |source| Error::Io { path, source }
    }
}
