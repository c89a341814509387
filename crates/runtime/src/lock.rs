use crate::errors::component_status;
use crate::Outrigger;
use proto_outrigger::runtime::{
    TryLockRequest, TryLockResponse, UnlockRequest, UnlockResponse, UnlockStatus,
};
use stores::lock;
use tonic::Status;

/// Namespace a caller's resource id so applications sharing one backend
/// cannot collide.
fn namespaced_resource(store_name: &str, app_id: &str, resource_id: &str) -> String {
    format!("lock|||{store_name}|||{app_id}|||{resource_id}")
}

impl Outrigger {
    pub async fn try_lock(&self, req: TryLockRequest) -> Result<TryLockResponse, Status> {
        let store = self.inner.lock_stores.get(&req.store_name)?;
        if req.resource_id.is_empty() {
            return Err(Status::invalid_argument("lock resource id is empty"));
        }
        if req.lock_owner.is_empty() {
            return Err(Status::invalid_argument("lock owner is empty"));
        }
        if req.expire <= 0 {
            return Err(Status::invalid_argument("lock expire must be positive"));
        }

        let success = store
            .try_lock(lock::TryLockRequest {
                resource_id: namespaced_resource(&req.store_name, self.app_id(), &req.resource_id),
                lock_owner: req.lock_owner,
                expire_secs: req.expire,
            })
            .await
            .map_err(|err| component_status("acquiring lock", err))?;

        Ok(TryLockResponse { success })
    }

    pub async fn unlock(&self, req: UnlockRequest) -> Result<UnlockResponse, Status> {
        let store = self.inner.lock_stores.get(&req.store_name)?;
        if req.resource_id.is_empty() {
            return Err(Status::invalid_argument("lock resource id is empty"));
        }
        if req.lock_owner.is_empty() {
            return Err(Status::invalid_argument("lock owner is empty"));
        }

        // Unlock reports component failure through its status code rather
        // than failing the RPC.
        let status = match store
            .unlock(lock::UnlockRequest {
                resource_id: namespaced_resource(&req.store_name, self.app_id(), &req.resource_id),
                lock_owner: req.lock_owner,
            })
            .await
        {
            Ok(lock::UnlockStatus::Success) => UnlockStatus::UnlockSuccess,
            Ok(lock::UnlockStatus::LockUnexist) => UnlockStatus::UnlockLockUnexist,
            Ok(lock::UnlockStatus::LockBelongToOthers) => UnlockStatus::UnlockLockBelongToOthers,
            Err(err) => {
                tracing::warn!(store = %req.store_name, error = %err, "unlock failed");
                UnlockStatus::UnlockInternalError
            }
        };

        Ok(UnlockResponse {
            status: status as i32,
        })
    }
}
