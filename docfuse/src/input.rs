//! Uploaded input files.

use std::fmt;

/// One uploaded file: display name plus raw bytes.
///
/// The name may be a relative path (folder uploads keep their structure); it
/// is used for classification, natural ordering and page titles. The
/// declared MIME type is informational only.
#[derive(Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    bytes: Vec<u8>,
    declared_type: Option<String>,
}

impl InputFile {
    /// Create an input file from a name and its contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            declared_type: None,
        }
    }

    /// Attach the MIME type the client declared for this file.
    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    /// Display name (possibly a relative path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type declared by the client, if any.
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// File size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file has no contents.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .field("declared_type", &self.declared_type)
            .finish()
    }
}
