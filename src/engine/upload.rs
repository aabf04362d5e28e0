/// Media types accepted for deal uploads. Browsers on Windows often label
/// `.csv` files as `application/vnd.ms-excel`.
pub const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

/// One uploaded file as received by the import engine.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>
}

impl Upload {
    pub fn new(content_type: Option<String>, file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type,
            file_name: file_name.filter(|name| !name.is_empty()),
            bytes
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the declared media type, ignoring parameters and case, is an accepted CSV type.
    pub fn has_csv_content_type(&self) -> bool {
        self.content_type.as_deref().is_some_and(|content_type| {
            let media_type = content_type.split(';').next().unwrap_or_default().trim();
            ACCEPTED_CONTENT_TYPES.iter().any(|accepted| media_type.eq_ignore_ascii_case(accepted))
        })
    }

    /// True when no file name was sent or the name ends in `.csv`, ignoring case.
    pub fn has_csv_file_name(&self) -> bool {
        self.file_name.as_deref().is_none_or(|name| name.to_ascii_lowercase().ends_with(".csv"))
    }
}
