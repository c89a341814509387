use crate::lock::{LockStore, TryLockRequest, UnlockRequest, UnlockStatus};
use crate::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Lock store over a process-local map with wall-clock expiry.
#[derive(Default)]
pub struct MemoryLock {
    inner: Mutex<HashMap<String, Held>>,
}

struct Held {
    owner: String,
    expires_at: Instant,
}

impl MemoryLock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LockStore for MemoryLock {
    async fn try_lock(&self, req: TryLockRequest) -> Result<bool> {
        let mut map = self.inner.lock().unwrap();

        let now = Instant::now();
        if let Some(held) = map.get(&req.resource_id) {
            if held.expires_at <= now {
                map.remove(&req.resource_id);
            }
        }

        match map.get_mut(&req.resource_id) {
            None => {
                map.insert(
                    req.resource_id,
                    Held {
                        owner: req.lock_owner,
                        expires_at: now + Duration::from_secs(req.expire_secs as u64),
                    },
                );
                Ok(true)
            }
            // Re-entrant: the holder refreshes its own lease.
            Some(held) if held.owner == req.lock_owner => {
                held.expires_at = now + Duration::from_secs(req.expire_secs as u64);
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    async fn unlock(&self, req: UnlockRequest) -> Result<UnlockStatus> {
        let mut map = self.inner.lock().unwrap();

        let now = Instant::now();
        if let Some(held) = map.get(&req.resource_id) {
            if held.expires_at <= now {
                map.remove(&req.resource_id);
            }
        }

        match map.get(&req.resource_id) {
            None => Ok(UnlockStatus::LockUnexist),
            Some(held) if held.owner != req.lock_owner => Ok(UnlockStatus::LockBelongToOthers),
            Some(_) => {
                map.remove(&req.resource_id);
                Ok(UnlockStatus::Success)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_contention_and_unlock_statuses() {
        let store = MemoryLock::new();

        let acquired = store
            .try_lock(TryLockRequest {
                resource_id: "r".to_string(),
                lock_owner: "alice".to_string(),
                expire_secs: 60,
            })
            .await
            .unwrap();
        assert!(acquired);

        let acquired = store
            .try_lock(TryLockRequest {
                resource_id: "r".to_string(),
                lock_owner: "bob".to_string(),
                expire_secs: 60,
            })
            .await
            .unwrap();
        assert!(!acquired);

        let status = store
            .unlock(UnlockRequest {
                resource_id: "r".to_string(),
                lock_owner: "bob".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(status, UnlockStatus::LockBelongToOthers);

        let status = store
            .unlock(UnlockRequest {
                resource_id: "r".to_string(),
                lock_owner: "alice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(status, UnlockStatus::Success);

        let status = store
            .unlock(UnlockRequest {
                resource_id: "r".to_string(),
                lock_owner: "alice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(status, UnlockStatus::LockUnexist);
    }
}
