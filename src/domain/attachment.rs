use super::mime_type::MimeType;

/// A classified upload ready to be inlined into a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime_type: MimeType,
    pub data: String,
}

impl Attachment {
    pub fn from_upload(raw: &str, declared_mime: Option<&str>) -> Self {
        Self {
            mime_type: MimeType::classify(raw, declared_mime),
            data: encoded_payload(raw).to_string(),
        }
    }
}

/// Returns the base64 body of a data URI, or the input itself when it has
/// no `,` separator (already raw).
pub fn encoded_payload(raw: &str) -> &str {
    match raw.split_once(',') {
        Some((_, body)) if !body.is_empty() => body,
        _ => raw,
    }
}
