use crate::file::{
    FileInfo, FileRequest, FileStore, ListRequest, ListResponse, PutRequest, StatResponse,
};
use crate::{Error, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt};

/// File store over a process-local map. Object names are flat; list treats
/// the request name as a prefix.
#[derive(Default)]
pub struct MemoryFiles {
    // BTreeMap keeps listings ordered by name.
    inner: Mutex<BTreeMap<String, Object>>,
}

#[derive(Clone)]
struct Object {
    data: Bytes,
    last_modified: String,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl FileStore for MemoryFiles {
    async fn get(&self, req: FileRequest) -> Result<Box<dyn AsyncRead + Send + Unpin>> {
        let map = self.inner.lock().unwrap();

        let object = map
            .get(&req.name)
            .ok_or_else(|| Error::NotFound(req.name.clone()))?;
        Ok(Box::new(std::io::Cursor::new(object.data.clone())))
    }

    async fn put(&self, mut req: PutRequest) -> Result<()> {
        let mut data = Vec::new();
        req.reader
            .read_to_end(&mut data)
            .await
            .map_err(|err| Error::Internal(err.into()))?;

        let mut map = self.inner.lock().unwrap();
        map.insert(
            req.name,
            Object {
                data: data.into(),
                last_modified: now_rfc3339(),
            },
        );
        Ok(())
    }

    async fn list(&self, req: ListRequest) -> Result<ListResponse> {
        let map = self.inner.lock().unwrap();

        let mut files: Vec<FileInfo> = map
            .iter()
            .filter(|(name, _)| name.starts_with(&req.name) && **name > req.marker)
            .map(|(name, object)| FileInfo {
                name: name.clone(),
                size: object.data.len() as i64,
                last_modified: object.last_modified.clone(),
                metadata: Default::default(),
            })
            .collect();

        let mut is_truncated = false;
        if req.page_size > 0 && files.len() > req.page_size as usize {
            files.truncate(req.page_size as usize);
            is_truncated = true;
        }
        let marker = if is_truncated {
            files.last().map(|f| f.name.clone()).unwrap_or_default()
        } else {
            String::new()
        };

        Ok(ListResponse {
            files,
            marker,
            is_truncated,
        })
    }

    async fn del(&self, req: FileRequest) -> Result<()> {
        let mut map = self.inner.lock().unwrap();

        map.remove(&req.name)
            .map(|_| ())
            .ok_or(Error::NotFound(req.name))
    }

    async fn stat(&self, req: FileRequest) -> Result<StatResponse> {
        let map = self.inner.lock().unwrap();

        let object = map.get(&req.name).ok_or(Error::NotFound(req.name))?;
        Ok(StatResponse {
            size: object.data.len() as i64,
            last_modified: object.last_modified.clone(),
            metadata: Default::default(),
        })
    }
}
