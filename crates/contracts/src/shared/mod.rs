pub mod pagination;
pub mod upload;
