use crate::config::{
    ChangeNotification, ConfigStore, ConfigurationItem, DeleteRequest, GetRequest, SetRequest,
    SubscribeRequest, Subscription,
};
use crate::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Configuration store over a process-local map, with change feeds.
#[derive(Default)]
pub struct MemoryConfig {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    // Keyed by (group, label, key).
    items: HashMap<(String, String, String), ConfigurationItem>,
    watchers: Vec<Watcher>,
    next_watcher_id: u64,
}

struct Watcher {
    id: u64,
    store_name: String,
    group: String,
    label: String,
    keys: Vec<String>,
    tx: mpsc::Sender<ChangeNotification>,
}

impl Watcher {
    fn matches(&self, item: &ConfigurationItem) -> bool {
        self.group == item.group
            && self.label == item.label
            && (self.keys.is_empty() || self.keys.iter().any(|k| *k == item.key))
    }
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ConfigStore for MemoryConfig {
    async fn get(&self, req: GetRequest) -> Result<Vec<ConfigurationItem>> {
        let inner = self.inner.lock().unwrap();

        let mut items: Vec<ConfigurationItem> = inner
            .items
            .values()
            .filter(|item| {
                item.group == req.group
                    && item.label == req.label
                    && (req.keys.is_empty() || req.keys.iter().any(|k| *k == item.key))
            })
            .cloned()
            .collect();
        items.sort_by(|l, r| l.key.cmp(&r.key));

        Ok(items)
    }

    async fn set(&self, req: SetRequest) -> Result<()> {
        // Collect notifications under the lock, deliver after releasing it.
        let mut sends: Vec<(mpsc::Sender<ChangeNotification>, ChangeNotification)> = Vec::new();
        {
            let mut inner = self.inner.lock().unwrap();

            for item in &req.items {
                inner.items.insert(
                    (item.group.clone(), item.label.clone(), item.key.clone()),
                    item.clone(),
                );
            }
            for watcher in &inner.watchers {
                let items: Vec<ConfigurationItem> = req
                    .items
                    .iter()
                    .filter(|item| watcher.matches(item))
                    .cloned()
                    .collect();

                if !items.is_empty() {
                    sends.push((
                        watcher.tx.clone(),
                        ChangeNotification {
                            store_name: watcher.store_name.clone(),
                            items,
                        },
                    ));
                }
            }
        }

        for (tx, notification) in sends {
            // A receiver torn down mid-send is a closed session, not an error.
            let _ = tx.send(notification).await;
        }
        Ok(())
    }

    async fn delete(&self, req: DeleteRequest) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();

        for key in &req.keys {
            inner
                .items
                .remove(&(req.group.clone(), req.label.clone(), key.clone()));
        }
        Ok(())
    }

    async fn subscribe(
        &self,
        req: SubscribeRequest,
        tx: mpsc::Sender<ChangeNotification>,
    ) -> Result<Box<dyn Subscription>> {
        let mut inner = self.inner.lock().unwrap();

        let id = inner.next_watcher_id;
        inner.next_watcher_id += 1;
        inner.watchers.push(Watcher {
            id,
            store_name: req.store_name,
            group: req.group,
            label: req.label,
            keys: req.keys,
            tx,
        });

        Ok(Box::new(MemorySubscription {
            id,
            inner: Arc::clone(&self.inner),
        }))
    }
}

struct MemorySubscription {
    id: u64,
    inner: Arc<Mutex<Inner>>,
}

impl Subscription for MemorySubscription {
    fn stop(self: Box<Self>) {
        let mut inner = self.inner.lock().unwrap();
        inner.watchers.retain(|w| w.id != self.id);
    }
}
