use contracts::domain::a001_document::aggregate::{CreateDocumentRequest, Document, DocumentId};
use contracts::shared::pagination::{ListQuery, Page, PageWire};

use crate::shared::http::{self, ApiError};

/// One page of documents, 1-based. `page_size` is the size learned from
/// earlier pages, for envelopes that do not report it.
pub async fn list_documents(
    page: u32,
    page_size: Option<u32>,
) -> Result<Page<Document>, ApiError> {
    let query = ListQuery::page(page);
    let path = http::with_query("ai/document/", &query)?;
    let wire: PageWire<Document> = http::get_json(&path, "Failed to fetch documents").await?;
    Ok(wire.into_page(query.page, page_size))
}

pub async fn get_document(id: DocumentId) -> Result<Document, ApiError> {
    http::get_json(&format!("ai/document/{}/", id), "Failed to fetch document").await
}

pub async fn create_document(request: &CreateDocumentRequest) -> Result<Document, ApiError> {
    http::post_json("ai/document/", request, "Failed to create document").await
}

pub async fn delete_document(id: DocumentId) -> Result<(), ApiError> {
    http::delete(&format!("ai/document/{}/", id), "Failed to delete document").await
}
