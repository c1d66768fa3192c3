use crate::domain::a001_document::aggregate::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type DocumentChunkId = i64;

/// Segment of a document's text produced by the backend chunking pipeline.
/// Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: DocumentChunkId,
    #[serde(alias = "document")]
    pub document_id: DocumentId,
    #[serde(alias = "content")]
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentChunk {
    /// At most `max_chars` characters of the text, with an ellipsis when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let text = self.text.trim();
        match text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
            None => text.to_string(),
        }
    }
}
