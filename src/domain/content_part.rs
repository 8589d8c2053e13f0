use serde::Serialize;

use super::attachment::Attachment;

/// One unit of an outbound model request, serialized in the
/// `generateContent` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn inline(attachment: Attachment) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: attachment.mime_type.as_mime().to_string(),
                data: attachment.data,
            },
        }
    }
}

/// The prompt always goes first; the attachment, if any, follows it.
pub fn build_content_parts(prompt: &str, attachment: Option<Attachment>) -> Vec<ContentPart> {
    let mut parts = Vec::with_capacity(2);
    parts.push(ContentPart::text(prompt));
    if let Some(attachment) = attachment {
        parts.push(ContentPart::inline(attachment));
    }
    parts
}
