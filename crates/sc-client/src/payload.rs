//! Binary payloads for upload.

use camino::Utf8Path;

use crate::error::ClientError;

/// A named file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    file_name: String,
    bytes: Vec<u8>,
}

impl FilePayload {
    /// Creates a payload from a file name and its contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a payload from disk, keeping only the file name of `path`.
    pub async fn read(path: &Utf8Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::read_file(path, e))?;
        let file_name = path.file_name().unwrap_or(path.as_str());
        Ok(Self::new(file_name, bytes))
    }

    /// Returns the file name sent with the form part.
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the contents.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns `true` if there is nothing to upload.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the MIME type sent with the form part.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match Utf8Path::new(&self.file_name).extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => "text/csv",
            Some(ext) if ext.eq_ignore_ascii_case("json") => "application/json",
            Some(ext) if ext.eq_ignore_ascii_case("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }

    pub(crate) fn into_parts(self) -> (String, Vec<u8>) {
        (self.file_name, self.bytes)
    }
}
