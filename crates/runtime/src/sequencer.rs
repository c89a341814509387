use crate::errors::component_status;
use crate::Outrigger;
use proto_outrigger::runtime::{AutoIncrement, GetNextIdRequest, GetNextIdResponse};
use std::collections::HashMap;
use std::sync::Arc;
use stores::sequencer::{self, Sequencer};
use tonic::Status;

/// Ids requested from the component per cache refill.
const SEGMENT_SIZE: i64 = 100;

/// Per-key cache of pre-allocated id ranges backing WEAK reads. The outer
/// map lock is never held across an await; contention on one key serializes
/// on that key's entry alone.
pub(crate) struct SequencerCache {
    entries: std::sync::Mutex<HashMap<String, Arc<tokio::sync::Mutex<CachedRange>>>>,
}

#[derive(Default)]
struct CachedRange {
    // Serves ids in [next, end).
    next: i64,
    end: i64,
}

impl SequencerCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Take the next cached id for `key`, refilling from the component when
    /// the range is spent. `Ok(None)` means the component cannot allocate
    /// segments and the caller must fall back to per-id delegation.
    async fn next_id(
        &self,
        store: &Arc<dyn Sequencer>,
        req: sequencer::NextIdRequest,
    ) -> stores::Result<Option<i64>> {
        let entry = {
            let mut entries = self.entries.lock().unwrap();
            entries.entry(req.key.clone()).or_default().clone()
        };
        let mut range = entry.lock().await;

        if range.next >= range.end {
            let Some(segment) = store.segment(req, SEGMENT_SIZE).await? else {
                return Ok(None);
            };
            tracing::debug!(from = segment.from, to = segment.to, "installed sequencer segment");
            range.next = segment.from;
            range.end = segment.to;
        }

        let id = range.next;
        range.next += 1;
        Ok(Some(id))
    }
}

fn namespaced_key(store_name: &str, app_id: &str, key: &str) -> String {
    format!("sequencer|||{store_name}|||{app_id}|||{key}")
}

impl Outrigger {
    pub async fn get_next_id(&self, req: GetNextIdRequest) -> Result<GetNextIdResponse, Status> {
        let store = self.inner.sequencers.get(&req.store_name)?;
        if req.key.is_empty() {
            return Err(Status::invalid_argument("sequencer key is empty"));
        }

        let component_req = sequencer::NextIdRequest {
            key: namespaced_key(&req.store_name, self.app_id(), &req.key),
            metadata: req.metadata,
        };
        let increment = req
            .options
            .map(|options| options.increment())
            .unwrap_or(AutoIncrement::Weak);

        let next_id = match increment {
            AutoIncrement::Strong => store.next_id(component_req).await,
            AutoIncrement::Weak => {
                match self
                    .inner
                    .sequencer_cache
                    .next_id(store, component_req.clone())
                    .await
                {
                    Ok(Some(id)) => Ok(id),
                    // Segments unsupported: degrade silently to delegation.
                    Ok(None) => store.next_id(component_req).await,
                    Err(err) => Err(err),
                }
            }
        }
        .map_err(|err| component_status("allocating next id", err))?;

        Ok(GetNextIdResponse { next_id })
    }
}
