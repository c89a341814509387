use crate::pubsub::{PubSub, PublishRequest};
use crate::{Feature, Result};
use std::sync::Mutex;

/// Loopback pub/sub component: publications are retained in-process and can
/// be drained by the embedding test or demo.
#[derive(Default)]
pub struct MemoryPubSub {
    features: Vec<Feature>,
    published: Mutex<Vec<PublishRequest>>,
}

impl MemoryPubSub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_features(features: Vec<Feature>) -> Self {
        Self {
            features,
            published: Mutex::new(Vec::new()),
        }
    }

    /// Drain everything published so far.
    pub fn take_published(&self) -> Vec<PublishRequest> {
        std::mem::take(&mut self.published.lock().unwrap())
    }
}

#[async_trait::async_trait]
impl PubSub for MemoryPubSub {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    async fn publish(&self, req: PublishRequest) -> Result<()> {
        self.published.lock().unwrap().push(req);
        Ok(())
    }
}
