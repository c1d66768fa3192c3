use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type DocumentId = i64;

/// Source document of the knowledge base. `file_url` is the storage key
/// returned by the upload bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub file_url: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Description, else the uploaded file name, else a placeholder.
    pub fn display_name(&self) -> String {
        let description = self.description.trim();
        if !description.is_empty() {
            return description.to_string();
        }
        file_name_from_key(&self.file_url).unwrap_or_else(|| "Untitled Document".to_string())
    }
}

/// Original file name of a stored object.
///
/// Keys look like `knowledge-base/1718000000000-Handbook.pdf`; the folder and
/// the millisecond timestamp prefix are stripped and percent-escapes decoded.
pub fn file_name_from_key(key: &str) -> Option<String> {
    let path = key.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    let decoded = urlencoding::decode(last)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| last.to_string());

    let name = match decoded.split_once('-') {
        Some((prefix, rest))
            if !prefix.is_empty()
                && !rest.is_empty()
                && prefix.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.to_string()
        }
        _ => decoded,
    };

    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Body of `POST ai/document/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub file_url: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(file_url: &str, description: &str) -> Document {
        let ts = "2024-03-15T14:02:26Z".parse().unwrap();
        Document {
            id: 1,
            file_url: file_url.to_string(),
            description: description.to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_display_name_prefers_description() {
        let doc = document("knowledge-base/1718000000000-Handbook.pdf", " Student Handbook ");
        assert_eq!(doc.display_name(), "Student Handbook");
    }

    #[test]
    fn test_display_name_falls_back_to_file_name() {
        let doc = document("knowledge-base/1718000000000-UPC%20Handbook.pdf", "");
        assert_eq!(doc.display_name(), "UPC Handbook.pdf");

        let doc = document("", "   ");
        assert_eq!(doc.display_name(), "Untitled Document");
    }

    #[test]
    fn test_file_name_keeps_non_timestamp_dashes() {
        assert_eq!(
            file_name_from_key("https://b.s3.r.amazonaws.com/docs/my-file.pdf?x=1").as_deref(),
            Some("my-file.pdf")
        );
        assert_eq!(file_name_from_key("folder/").as_deref(), None);
    }

    #[test]
    fn test_decodes_backend_timestamps() {
        let doc: Document = serde_json::from_str(
            r#"{
                "id": 3,
                "file_url": "knowledge-base/1-a.pdf",
                "description": "A",
                "created_at": "2024-03-15T14:02:26.123456+08:00",
                "updated_at": "2024-03-15T06:02:26Z"
            }"#,
        )
        .unwrap();
        assert_eq!(doc.created_at.to_rfc3339(), "2024-03-15T06:02:26.123456+00:00");
    }
}
