pub mod a001_document;
pub mod a002_document_chunk;
pub mod a003_conversation;
