use crate::Result;

/// `resource_id` arrives already namespaced by the core; components never see
/// a raw application resource id.
#[derive(Debug, Clone, Default)]
pub struct TryLockRequest {
    pub resource_id: String,
    pub lock_owner: String,
    pub expire_secs: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UnlockRequest {
    pub resource_id: String,
    pub lock_owner: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockStatus {
    Success,
    LockUnexist,
    LockBelongToOthers,
}

#[async_trait::async_trait]
pub trait LockStore: Send + Sync + 'static {
    /// Returns whether the lock was acquired. `false` is not an error: the
    /// resource is simply held by someone else.
    async fn try_lock(&self, req: TryLockRequest) -> Result<bool>;

    async fn unlock(&self, req: UnlockRequest) -> Result<UnlockStatus>;
}
