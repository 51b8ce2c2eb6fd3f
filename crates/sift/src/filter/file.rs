use super::{Coercion, Filter};
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, FileOptions};
use sift_value::Value;

const FILE_CAPABILITIES: [&str; 2] = ["read", "size"];
const UPLOAD_CAPABILITIES: [&str; 2] = ["original_filename", "content_type"];

/// Accepts file-like hosts: `read` and `size`, plus `original_filename` and
/// `content_type` for uploads. Blank text (an empty form field) is empty.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    options: FileOptions,
}

impl FileFilter {
    #[must_use]
    pub const fn new(options: FileOptions) -> Self {
        Self { options }
    }
}

impl Filter for FileFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::File
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::NOT_A_FILE
    }

    fn coerce(&self, raw: Value) -> Coercion {
        match &raw {
            Value::Text(text) if text.trim().is_empty() => Coercion::Empty(raw),
            _ if self.conforms(&raw) => Coercion::Value(raw),
            _ => Coercion::invalid(raw, ErrorCode::NOT_A_FILE),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        let Value::Host(host) = value else {
            return false;
        };
        let object = host.object();
        let upload: &[&str] = if self.options.upload {
            &UPLOAD_CAPABILITIES
        } else {
            &[]
        };
        FILE_CAPABILITIES
            .iter()
            .chain(upload)
            .all(|capability| object.has_capability(capability))
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let size = value.as_host()?.object().byte_size()?;
        self.options
            .max_size
            .is_some_and(|max| size > max)
            .then_some(ErrorCode::TOO_LARGE)
    }
}
