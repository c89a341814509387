use crate::{Feature, Result};
use bytes::Bytes;
use std::collections::HashMap;

/// A fully-prepared publication: `data` is the serialized envelope (or the
/// caller's raw bytes when the raw-payload escape hatch was used).
#[derive(Debug, Clone, Default)]
pub struct PublishRequest {
    pub topic: String,
    pub data: Bytes,
    pub metadata: HashMap<String, String>,
}

#[async_trait::async_trait]
pub trait PubSub: Send + Sync + 'static {
    fn features(&self) -> &[Feature];

    async fn publish(&self, req: PublishRequest) -> Result<()>;
}
