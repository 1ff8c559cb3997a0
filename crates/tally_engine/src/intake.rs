use std::io;
use std::path::Path;

use tally_logging::tally_debug;

use crate::{decode_text, DecodeError, LoadedFile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("{message}")]
    Io { kind: io::ErrorKind, message: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl From<io::Error> for IntakeError {
    fn from(err: io::Error) -> Self {
        IntakeError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Reads the whole file into memory and decodes it as text.
///
/// There is no size limit; an empty file yields empty text.
pub async fn read_text_file(path: &Path) -> Result<LoadedFile, IntakeError> {
    let bytes = tokio::fs::read(path).await?;
    let byte_len = bytes.len() as u64;
    let decoded = decode_text(bytes)?;
    tally_debug!(
        "read {:?}: {} bytes as {}",
        path,
        byte_len,
        decoded.encoding_label
    );
    Ok(LoadedFile {
        path: path.to_path_buf(),
        text: decoded.text,
        encoding_label: decoded.encoding_label,
        byte_len,
    })
}
