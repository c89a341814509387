use crate::{Feature, Result};
use bytes::Bytes;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub key: String,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetResponse {
    pub data: Bytes,
    pub etag: Option<String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct SetRequest {
    pub key: String,
    pub value: Bytes,
    /// When present the write must be rejected with `ETagMismatch` unless the
    /// stored version matches.
    pub etag: Option<String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub key: String,
    pub etag: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// One step of a state transaction.
#[derive(Debug, Clone)]
pub enum TransactionOperation {
    Upsert(SetRequest),
    Delete(DeleteRequest),
}

#[async_trait::async_trait]
pub trait StateStore: Send + Sync + 'static {
    fn features(&self) -> &[Feature];

    /// Returns `None` when the key does not exist.
    async fn get(&self, req: GetRequest) -> Result<Option<GetResponse>>;

    /// Fetch many keys in one component round-trip. `Ok(None)` means the
    /// component has no native bulk path and the core should fan out over
    /// [`StateStore::get`] instead; `Ok(Some(_))` is position-aligned with
    /// `reqs`.
    async fn bulk_get(&self, reqs: Vec<GetRequest>) -> Result<Option<Vec<Option<GetResponse>>>> {
        let _ = reqs;
        Ok(None)
    }

    async fn set(&self, req: SetRequest) -> Result<()>;

    async fn delete(&self, req: DeleteRequest) -> Result<()>;

    async fn bulk_delete(&self, reqs: Vec<DeleteRequest>) -> Result<()> {
        for req in reqs {
            self.delete(req).await?;
        }
        Ok(())
    }
}

/// The stronger, separately-registered capability of stores that can apply a
/// set of writes atomically.
#[async_trait::async_trait]
pub trait TransactionalStateStore: StateStore {
    async fn transact(
        &self,
        operations: Vec<TransactionOperation>,
        metadata: HashMap<String, String>,
    ) -> Result<()>;
}
