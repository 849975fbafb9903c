use serde::Serialize;

use crate::services::Pagination;

/// Paginated listing envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub next: String,
    pub prev: Option<String>,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(pagination: Pagination, base_path: &str, total: u64, items: Vec<T>) -> Self {
        let (next, prev) = pagination.links(base_path);
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total,
            next,
            prev,
            items,
        }
    }
}

/// Single-entity success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub result: T,
}

impl<T> Envelope<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
