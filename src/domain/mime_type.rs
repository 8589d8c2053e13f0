use std::fmt;

use super::attachment::encoded_payload;

/// Leading characters of a base64-encoded `%PDF-` header.
pub const PDF_BASE64_SIGNATURE: &str = "JVBERi";

/// Media type of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MimeType {
    Pdf,
    Png,
    Jpeg,
    Other(String),
}

impl MimeType {
    pub fn from_mime(mime: &str) -> Self {
        let trimmed = mime.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "application/pdf" => Self::Pdf,
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_mime(&self) -> &str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Other(mime) => mime,
        }
    }

    /// Guesses the media type of an upload that is either raw base64 or a
    /// data URI.
    ///
    /// The PDF signature wins over anything the caller declared, since PDFs
    /// are routinely uploaded under an image label. A data URI header comes
    /// next, then the declared type, then JPEG.
    pub fn classify(payload: &str, declared: Option<&str>) -> Self {
        if payload.starts_with(PDF_BASE64_SIGNATURE)
            || encoded_payload(payload).starts_with(PDF_BASE64_SIGNATURE)
        {
            return Self::Pdf;
        }

        if payload.starts_with("data:image/png") {
            return Self::Png;
        }

        if payload.starts_with("data:image/jpeg") || payload.starts_with("data:image/jpg") {
            return Self::Jpeg;
        }

        match declared.map(str::trim).filter(|d| !d.is_empty()) {
            Some(declared) => Self::from_mime(declared),
            None => Self::Jpeg,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}
