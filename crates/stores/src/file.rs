use crate::Result;
use std::collections::HashMap;
use tokio::io::AsyncRead;

/// Names one object for get / delete / stat.
#[derive(Debug, Clone, Default)]
pub struct FileRequest {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// An upload. `reader` yields the object's bytes; components consume it to
/// EOF without assuming the total size is known up front.
pub struct PutRequest {
    pub name: String,
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// Prefix to list under; empty lists everything.
    pub name: String,
    pub page_size: i32,
    pub marker: String,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct FileInfo {
    pub name: String,
    pub size: i64,
    pub last_modified: String,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListResponse {
    pub files: Vec<FileInfo>,
    pub marker: String,
    pub is_truncated: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StatResponse {
    pub size: i64,
    pub last_modified: String,
    pub metadata: HashMap<String, String>,
}

#[async_trait::async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Open a byte stream over the named object. Absent objects are
    /// `Error::NotFound`.
    async fn get(&self, req: FileRequest) -> Result<Box<dyn AsyncRead + Send + Unpin>>;

    async fn put(&self, req: PutRequest) -> Result<()>;

    async fn list(&self, req: ListRequest) -> Result<ListResponse>;

    async fn del(&self, req: FileRequest) -> Result<()>;

    async fn stat(&self, req: FileRequest) -> Result<StatResponse>;
}
