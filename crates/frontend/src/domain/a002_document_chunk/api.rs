use contracts::domain::a001_document::aggregate::DocumentId;
use contracts::domain::a002_document_chunk::aggregate::{DocumentChunk, DocumentChunkId};
use contracts::shared::pagination::{ListQuery, Page, PageWire};

use crate::shared::http::{self, ApiError};

/// One page of chunks, optionally restricted to one document.
pub async fn list_chunks(
    page: u32,
    document_id: Option<DocumentId>,
    page_size: Option<u32>,
) -> Result<Page<DocumentChunk>, ApiError> {
    let query = ListQuery::page(page).with_document(document_id);
    let path = http::with_query("ai/document-chunk/", &query)?;
    let wire: PageWire<DocumentChunk> =
        http::get_json(&path, "Failed to fetch document chunks").await?;
    Ok(wire.into_page(query.page, page_size))
}

pub async fn get_chunk(id: DocumentChunkId) -> Result<DocumentChunk, ApiError> {
    http::get_json(
        &format!("ai/document-chunk/{}/", id),
        "Failed to fetch document chunk",
    )
    .await
}
