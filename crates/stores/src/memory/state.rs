use crate::state::{
    DeleteRequest, GetRequest, GetResponse, SetRequest, StateStore, TransactionOperation,
    TransactionalStateStore,
};
use crate::{Error, Feature, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

const FEATURES: &[Feature] = &[Feature::Etag];

/// State store over a process-local map. Etags are monotonic per-key version
/// numbers, checked on every conditional write.
#[derive(Default)]
pub struct MemoryState {
    inner: Mutex<HashMap<String, Versioned>>,
}

#[derive(Clone)]
struct Versioned {
    data: Bytes,
    metadata: HashMap<String, String>,
    version: u64,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_etag(key: &str, etag: &Option<String>, current: Option<u64>) -> Result<()> {
    let Some(etag) = etag else {
        return Ok(());
    };
    let version: u64 = etag.parse().map_err(|_| Error::ETagInvalid {
        key: key.to_string(),
        etag: etag.clone(),
    })?;
    match current {
        Some(v) if v == version => Ok(()),
        _ => Err(Error::ETagMismatch(key.to_string())),
    }
}

fn apply_set(map: &mut HashMap<String, Versioned>, req: SetRequest) {
    let version = map.get(&req.key).map(|v| v.version + 1).unwrap_or(1);
    map.insert(
        req.key,
        Versioned {
            data: req.value,
            metadata: req.metadata,
            version,
        },
    );
}

#[async_trait::async_trait]
impl StateStore for MemoryState {
    fn features(&self) -> &[Feature] {
        FEATURES
    }

    async fn get(&self, req: GetRequest) -> Result<Option<GetResponse>> {
        let map = self.inner.lock().unwrap();

        Ok(map.get(&req.key).map(|v| GetResponse {
            data: v.data.clone(),
            etag: Some(v.version.to_string()),
            metadata: v.metadata.clone(),
        }))
    }

    async fn set(&self, req: SetRequest) -> Result<()> {
        let mut map = self.inner.lock().unwrap();

        check_etag(&req.key, &req.etag, map.get(&req.key).map(|v| v.version))?;
        apply_set(&mut map, req);
        Ok(())
    }

    async fn delete(&self, req: DeleteRequest) -> Result<()> {
        let mut map = self.inner.lock().unwrap();

        check_etag(&req.key, &req.etag, map.get(&req.key).map(|v| v.version))?;
        map.remove(&req.key);
        Ok(())
    }
}

#[async_trait::async_trait]
impl TransactionalStateStore for MemoryState {
    async fn transact(
        &self,
        operations: Vec<TransactionOperation>,
        _metadata: HashMap<String, String>,
    ) -> Result<()> {
        let mut map = self.inner.lock().unwrap();

        // Validate every etag before mutating anything.
        for op in &operations {
            let (key, etag) = match op {
                TransactionOperation::Upsert(set) => (&set.key, &set.etag),
                TransactionOperation::Delete(del) => (&del.key, &del.etag),
            };
            check_etag(key, etag, map.get(key).map(|v| v.version))?;
        }

        for op in operations {
            match op {
                TransactionOperation::Upsert(set) => apply_set(&mut map, set),
                TransactionOperation::Delete(del) => {
                    map.remove(&del.key);
                }
            }
        }
        Ok(())
    }
}
