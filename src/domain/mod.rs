mod analysis_result;
mod attachment;
mod content_part;
mod mime_type;
mod partial_analysis;
mod record_id;

pub use analysis_result::{
    AnalysisResult, Check, Coverage, EstimatedDiscrepancy, Flag, SectionAnalysis,
    TolerancePolicy, defaults,
};
pub use attachment::{Attachment, encoded_payload};
pub use content_part::{ContentPart, InlineData, build_content_parts};
pub use mime_type::{MimeType, PDF_BASE64_SIGNATURE};
pub use partial_analysis::PartialAnalysis;
pub use record_id::RecordId;
