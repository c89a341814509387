use crate::errors::component_status;
use crate::Outrigger;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use proto_outrigger::runtime::{
    DelFileRequest, DelFileResponse, FileInfo, FileRequest, GetFileMetaRequest,
    GetFileMetaResponse, GetFileRequest, GetFileResponse, ListFileRequest, ListFileResponse,
    PutFileRequest, PutFileResponse,
};
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{ready, Context, Poll};
use stores::file;
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Status;

/// Size of every pooled transfer buffer.
const CHUNK_CAPACITY: usize = 1 << 17; // 128 KiB

/// Process-wide pool of transfer buffers. Leases are returned on drop, so
/// every exit path of a transfer, cancellation included, gives the buffer
/// back.
pub(crate) struct BufferPool {
    free: Mutex<Vec<BytesMut>>,
}

impl BufferPool {
    pub(crate) fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }

    fn lease(pool: &Arc<Self>) -> Lease {
        let mut buf = pool
            .free
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| BytesMut::with_capacity(CHUNK_CAPACITY));
        buf.resize(CHUNK_CAPACITY, 0);

        Lease {
            buf,
            pool: Arc::clone(pool),
        }
    }

    #[cfg(test)]
    fn free_count(&self) -> usize {
        self.free.lock().unwrap().len()
    }
}

struct Lease {
    buf: BytesMut,
    pool: Arc<BufferPool>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        self.pool.free.lock().unwrap().push(buf);
    }
}

impl std::ops::Deref for Lease {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl std::ops::DerefMut for Lease {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

/// Adapts a stream of upload frames into the byte reader a file component
/// consumes: leftover bytes of the frame in hand are served first, further
/// frames are pulled lazily, and frame boundaries disappear.
struct ChunkReader<S> {
    frames: S,
    current: Bytes,
}

impl<S> ChunkReader<S> {
    fn new(first: Bytes, frames: S) -> Self {
        Self {
            frames,
            current: first,
        }
    }
}

impl<S> AsyncRead for ChunkReader<S>
where
    S: Stream<Item = Result<PutFileRequest, Status>> + Send + Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        loop {
            if !this.current.is_empty() {
                let take = this.current.len().min(buf.remaining());
                buf.put_slice(&this.current.split_to(take));
                return Poll::Ready(Ok(()));
            }

            match ready!(Pin::new(&mut this.frames).poll_next(cx)) {
                // Empty frames are skipped rather than read as EOF.
                Some(Ok(frame)) => this.current = frame.data,
                Some(Err(status)) => {
                    return Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, status)))
                }
                None => return Poll::Ready(Ok(())),
            }
        }
    }
}

impl Outrigger {
    /// Stream the named object back in chunks. The component's reader and the
    /// pooled buffer are released whenever the transfer ends, including a
    /// client-side cancellation.
    pub async fn get_file(
        &self,
        req: GetFileRequest,
    ) -> Result<ReceiverStream<Result<GetFileResponse, Status>>, Status> {
        let store = self.inner.file_stores.get(&req.store_name)?;
        if req.name.is_empty() {
            return Err(Status::invalid_argument("file name is empty"));
        }

        let mut reader = store
            .get(file::FileRequest {
                name: req.name.clone(),
                metadata: req.metadata,
            })
            .await
            .map_err(|err| component_status("opening file", err))?;

        let mut lease = BufferPool::lease(&self.inner.buffers);
        let name = req.name;
        let (tx, rx) = mpsc::channel(8);

        tokio::spawn(async move {
            loop {
                match reader.read(&mut lease[..]).await {
                    Ok(0) => break,
                    Ok(n) => {
                        let chunk = Bytes::copy_from_slice(&lease[..n]);
                        if tx.send(Ok(GetFileResponse { data: chunk })).await.is_err() {
                            tracing::debug!(file = %name, "download cancelled by receiver");
                            break;
                        }
                    }
                    Err(err) => {
                        let _ = tx
                            .send(Err(Status::internal(format!(
                                "reading file '{name}': {err}"
                            ))))
                            .await;
                        break;
                    }
                }
            }
            // `lease` and `reader` drop here on every path.
        });

        Ok(ReceiverStream::new(rx))
    }

    /// Consume an upload stream. The first frame fixes the store, name and
    /// metadata; an EOF before any frame is a clean no-op.
    pub async fn put_file<S>(&self, mut frames: S) -> Result<PutFileResponse, Status>
    where
        S: Stream<Item = Result<PutFileRequest, Status>> + Send + Unpin + 'static,
    {
        let Some(first) = frames.next().await else {
            return Ok(PutFileResponse {});
        };
        let first = first?;

        let store = self.inner.file_stores.get(&first.store_name)?;
        if first.name.is_empty() {
            return Err(Status::invalid_argument("file name is empty"));
        }

        tracing::debug!(store = %first.store_name, file = %first.name, "receiving file");
        store
            .put(file::PutRequest {
                name: first.name,
                reader: Box::new(ChunkReader::new(first.data, frames)),
                metadata: first.metadata,
            })
            .await
            .map_err(|err| component_status("writing file", err))?;

        Ok(PutFileResponse {})
    }

    pub async fn list_file(&self, req: ListFileRequest) -> Result<ListFileResponse, Status> {
        let (store, named) = self.file_request(req.request)?;

        let listing = store
            .list(file::ListRequest {
                name: named.name,
                page_size: req.page_size,
                marker: req.marker,
                metadata: named.metadata,
            })
            .await
            .map_err(|err| component_status("listing files", err))?;

        Ok(ListFileResponse {
            files: listing
                .files
                .into_iter()
                .map(|info| FileInfo {
                    file_name: info.name,
                    size: info.size,
                    last_modified: info.last_modified,
                    metadata: info.metadata,
                })
                .collect(),
            marker: listing.marker,
            is_truncated: listing.is_truncated,
        })
    }

    pub async fn del_file(&self, req: DelFileRequest) -> Result<DelFileResponse, Status> {
        let (store, named) = self.file_request(req.request)?;
        if named.name.is_empty() {
            return Err(Status::invalid_argument("file name is empty"));
        }

        store
            .del(file::FileRequest {
                name: named.name,
                metadata: named.metadata,
            })
            .await
            .map_err(|err| component_status("deleting file", err))?;

        Ok(DelFileResponse {})
    }

    pub async fn get_file_meta(
        &self,
        req: GetFileMetaRequest,
    ) -> Result<GetFileMetaResponse, Status> {
        let (store, named) = self.file_request(req.request)?;
        if named.name.is_empty() {
            return Err(Status::invalid_argument("file name is empty"));
        }

        let stat = store
            .stat(file::FileRequest {
                name: named.name,
                metadata: named.metadata,
            })
            .await
            .map_err(|err| component_status("reading file metadata", err))?;

        Ok(GetFileMetaResponse {
            size: stat.size,
            last_modified: stat.last_modified,
            metadata: stat.metadata,
        })
    }

    fn file_request(
        &self,
        req: Option<FileRequest>,
    ) -> Result<(&Arc<dyn file::FileStore>, FileRequest), Status> {
        let req = req.ok_or_else(|| Status::invalid_argument("file request is nil"))?;
        let store = self.inner.file_stores.get(&req.store_name)?;
        Ok((store, req))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use stores::memory::MemoryFiles;

    fn runtime() -> Outrigger {
        Outrigger::builder("test-app")
            .file_store("f", Arc::new(MemoryFiles::new()))
            .build()
    }

    fn frames(
        parts: Vec<Result<PutFileRequest, Status>>,
    ) -> impl Stream<Item = Result<PutFileRequest, Status>> + Send + Unpin + 'static {
        futures::stream::iter(parts)
    }

    fn put_frame(store: &str, name: &str, data: &'static [u8]) -> PutFileRequest {
        PutFileRequest {
            store_name: store.to_string(),
            name: name.to_string(),
            data: Bytes::from_static(data),
            ..Default::default()
        }
    }

    fn data_frame(data: &'static [u8]) -> PutFileRequest {
        PutFileRequest {
            data: Bytes::from_static(data),
            ..Default::default()
        }
    }

    async fn collect_file(runtime: &Outrigger, name: &str) -> Vec<u8> {
        let stream = runtime
            .get_file(GetFileRequest {
                store_name: "f".to_string(),
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        stream
            .map(|chunk| chunk.unwrap().data)
            .collect::<Vec<_>>()
            .await
            .concat()
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let runtime = runtime();

        runtime
            .put_file(frames(vec![
                Ok(put_frame("f", "greeting.txt", b"hello ")),
                Ok(data_frame(b"")),
                Ok(data_frame(b"file ")),
                Ok(data_frame(b"world")),
            ]))
            .await
            .unwrap();

        assert_eq!(collect_file(&runtime, "greeting.txt").await, b"hello file world");
    }

    #[tokio::test]
    async fn test_eof_before_any_frame_is_clean() {
        let runtime = runtime();
        runtime.put_file(frames(vec![])).await.unwrap();
    }

    #[tokio::test]
    async fn test_download_of_missing_file_is_not_found() {
        let runtime = runtime();

        let status = runtime
            .get_file(GetFileRequest {
                store_name: "f".to_string(),
                name: "nope".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn test_buffer_returns_to_the_pool_after_download() {
        let runtime = runtime();

        runtime
            .put_file(frames(vec![Ok(put_frame("f", "a", b"payload"))]))
            .await
            .unwrap();

        assert_eq!(collect_file(&runtime, "a").await, b"payload");

        // The download task has finished (the stream is drained), so its
        // lease must be back in the pool.
        for _ in 0..50 {
            if runtime.inner.buffers.free_count() == 1 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("leased buffer was never returned");
    }

    #[tokio::test]
    async fn test_list_del_and_stat() {
        let runtime = runtime();

        for name in ["logs/a", "logs/b", "other/c"] {
            runtime
                .put_file(frames(vec![Ok(put_frame("f", name, b"x"))]))
                .await
                .unwrap();
        }

        let listing = runtime
            .list_file(ListFileRequest {
                request: Some(FileRequest {
                    store_name: "f".to_string(),
                    name: "logs/".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<&str> = listing.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["logs/a", "logs/b"]);

        let meta = runtime
            .get_file_meta(GetFileMetaRequest {
                request: Some(FileRequest {
                    store_name: "f".to_string(),
                    name: "logs/a".to_string(),
                    ..Default::default()
                }),
            })
            .await
            .unwrap();
        assert_eq!(meta.size, 1);

        runtime
            .del_file(DelFileRequest {
                request: Some(FileRequest {
                    store_name: "f".to_string(),
                    name: "logs/a".to_string(),
                    ..Default::default()
                }),
            })
            .await
            .unwrap();

        let status = runtime
            .get_file_meta(GetFileMetaRequest {
                request: Some(FileRequest {
                    store_name: "f".to_string(),
                    name: "logs/a".to_string(),
                    ..Default::default()
                }),
            })
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);

        let status = runtime
            .del_file(DelFileRequest { request: None })
            .await
            .unwrap_err();
        insta::assert_snapshot!(status.message(), @"file request is nil");
    }
}
