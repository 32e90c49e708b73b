use std::fmt;
use std::path::PathBuf;

/// A raw scalar handed to a sanitizer.
///
/// Request input always arrives as [`RawValue::Str`]; the other variants let
/// programmatic callers feed already-typed values through the same path.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// No value
    Null,
    /// A native boolean
    Bool(bool),
    /// A native integer
    Int(i64),
    /// A native float
    Float(f64),
    /// A string, usually straight from the request
    Str(String),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Str(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Str(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// Outcome reported by the web server for one uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// The file arrived intact.
    Ok,
    /// The file exceeds the server-wide size limit.
    ExceedsServerLimit,
    /// The file exceeds the limit declared by the form.
    ExceedsFormLimit,
    /// Only part of the file arrived.
    Partial,
    /// No file was selected.
    NoFile,
    /// The server has no temporary directory.
    NoTempDir,
    /// The file could not be written to disk.
    CannotWrite,
    /// A server extension stopped the upload.
    Extension,
}

impl UploadStatus {
    /// Maps the numeric status codes used by common web servers.
    ///
    /// Unknown codes map to [`UploadStatus::Extension`].
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::ExceedsServerLimit,
            2 => Self::ExceedsFormLimit,
            3 => Self::Partial,
            4 => Self::NoFile,
            6 => Self::NoTempDir,
            7 => Self::CannotWrite,
            _ => Self::Extension,
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::ExceedsServerLimit => write!(f, "file exceeds the server size limit"),
            Self::ExceedsFormLimit => write!(f, "file exceeds the form size limit"),
            Self::Partial => write!(f, "file was only partially uploaded"),
            Self::NoFile => write!(f, "no file was uploaded"),
            Self::NoTempDir => write!(f, "missing temporary folder"),
            Self::CannotWrite => write!(f, "failed to write file to disk"),
            Self::Extension => write!(f, "upload stopped by extension"),
        }
    }
}

/// Metadata for one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-side file name
    pub name: String,
    /// Where the server stored the upload
    pub tmp_path: PathBuf,
    /// MIME type reported by the client
    pub mime_type: String,
    /// Upload outcome
    pub status: UploadStatus,
    /// Size in bytes
    pub size: u64,
}

/// A value submitted for one field name.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// A text parameter from the query string or request body
    Text(String),
    /// An uploaded file
    File(UploadedFile),
}

impl InputValue {
    /// Returns true for whitespace-only text and for "no file" uploads.
    pub fn is_empty(&self) -> bool {
        match self {
            InputValue::Text(text) => text.trim().is_empty(),
            InputValue::File(file) => file.status == UploadStatus::NoFile,
        }
    }
}

/// A field's value after sanitization.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Nothing was submitted, or sanitization failed
    Null,
    /// Checkbox state
    Bool(bool),
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Normalized text
    Text(String),
    /// Accepted upload
    File(UploadedFile),
}

impl FieldValue {
    /// Returns true when the value counts as "nothing submitted".
    ///
    /// `false`, `0` and `0.0` are real values and are not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the value as a float, if numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the upload, if this is a file value.
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            FieldValue::File(file) => Some(file),
            _ => None,
        }
    }
}
