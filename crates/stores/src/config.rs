use crate::Result;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// One configuration entry, fully qualified by (group, label, key).
/// The core guarantees `group` and `label` are non-blank by the time an item
/// reaches a component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationItem {
    pub key: String,
    pub content: String,
    pub group: String,
    pub label: String,
    pub tags: HashMap<String, String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub app_id: String,
    pub group: String,
    pub label: String,
    /// Empty means "all keys of the (group, label)".
    pub keys: Vec<String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct SetRequest {
    pub app_id: String,
    pub items: Vec<ConfigurationItem>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub app_id: String,
    pub group: String,
    pub label: String,
    pub keys: Vec<String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubscribeRequest {
    /// The name under which the core resolved this component. Components echo
    /// it back in every notification so that one session channel can carry
    /// feeds from several stores.
    pub store_name: String,
    pub app_id: String,
    pub group: String,
    pub label: String,
    pub keys: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// A batch of changed items, produced by one component subscription.
#[derive(Debug, Clone)]
pub struct ChangeNotification {
    pub store_name: String,
    pub items: Vec<ConfigurationItem>,
}

/// Handle to one live component subscription. The subscription session that
/// opened it owns it, and stops it exactly once on teardown. Stopping one
/// handle must not disturb feeds opened by other sessions.
pub trait Subscription: Send + Sync {
    fn stop(self: Box<Self>);
}

#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync + 'static {
    /// Group substituted for a blank-after-trim request group.
    fn default_group(&self) -> &str {
        "default"
    }

    /// Label substituted for a blank-after-trim request label.
    fn default_label(&self) -> &str {
        "default"
    }

    async fn get(&self, req: GetRequest) -> Result<Vec<ConfigurationItem>>;

    async fn set(&self, req: SetRequest) -> Result<()>;

    async fn delete(&self, req: DeleteRequest) -> Result<()>;

    /// Open a change feed matching `req`, delivering batches on `tx`. The
    /// sender is shared by every subscription of one session; the component
    /// must drop its clone when the returned handle is stopped.
    async fn subscribe(
        &self,
        req: SubscribeRequest,
        tx: mpsc::Sender<ChangeNotification>,
    ) -> Result<Box<dyn Subscription>>;
}
