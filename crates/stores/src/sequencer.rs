use crate::Result;
use std::collections::HashMap;

/// `key` arrives already namespaced by the core.
#[derive(Debug, Clone, Default)]
pub struct NextIdRequest {
    pub key: String,
    pub metadata: HashMap<String, String>,
}

/// A pre-allocated id range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: i64,
    pub to: i64,
}

#[async_trait::async_trait]
pub trait Sequencer: Send + Sync + 'static {
    /// Allocate the next id for `key`. Ids are strictly increasing per key.
    async fn next_id(&self, req: NextIdRequest) -> Result<i64>;

    /// Reserve a batch of `size` ids at once. `Ok(None)` means batches are
    /// unsupported and callers must fall back to per-id allocation.
    async fn segment(&self, req: NextIdRequest, size: i64) -> Result<Option<Segment>> {
        let _ = (req, size);
        Ok(None)
    }
}
