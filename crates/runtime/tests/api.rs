//! End-to-end scenarios driven through the wire-facing service trait against
//! the in-memory reference components.

use bytes::Bytes;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use proto_outrigger::runtime::runtime_server::Runtime as RuntimeApi;
use proto_outrigger::runtime::*;
use runtime::Outrigger;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stores::memory::{MemoryConfig, MemoryFiles, MemoryPubSub, MemorySequencer, MemoryState};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Code, Request};

fn test_runtime() -> (Outrigger, Arc<MemoryPubSub>) {
    let pubsub = Arc::new(MemoryPubSub::new());
    let runtime = Outrigger::builder("A")
        .config_store("cfg", Arc::new(MemoryConfig::new()))
        .transactional_state_store("s", Arc::new(MemoryState::new()))
        .pubsub("p", pubsub.clone())
        .file_store("f", Arc::new(MemoryFiles::new()))
        .lock_store("L", Arc::new(stores::memory::MemoryLock::new()))
        .sequencer("seq", Arc::new(MemorySequencer::new()))
        .build();
    (runtime, pubsub)
}

#[tokio::test]
async fn test_state_round_trip_over_the_wire() {
    let (runtime, _) = test_runtime();

    RuntimeApi::save_state(
        &runtime,
        Request::new(SaveStateRequest {
            store_name: "s".to_string(),
            states: vec![StateItem {
                key: "k".to_string(),
                value: Bytes::from_static(b"\x01"),
                ..Default::default()
            }],
        }),
    )
    .await
    .unwrap();

    let got = RuntimeApi::get_state(
        &runtime,
        Request::new(GetStateRequest {
            store_name: "s".to_string(),
            key: "k".to_string(),
            ..Default::default()
        }),
    )
    .await
    .unwrap()
    .into_inner();
    assert_eq!(got.data, Bytes::from_static(b"\x01"));

    RuntimeApi::delete_state(
        &runtime,
        Request::new(DeleteStateRequest {
            store_name: "s".to_string(),
            key: "k".to_string(),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    let got = RuntimeApi::get_state(
        &runtime,
        Request::new(GetStateRequest {
            store_name: "s".to_string(),
            key: "k".to_string(),
            ..Default::default()
        }),
    )
    .await
    .unwrap()
    .into_inner();
    assert_eq!(got.data, Bytes::new());
}

#[tokio::test]
async fn test_unknown_store_is_rejected_without_touching_components() {
    let (runtime, pubsub) = test_runtime();

    let status = RuntimeApi::publish_event(
        &runtime,
        Request::new(PublishEventRequest {
            pubsub_name: "unconfigured".to_string(),
            topic: "t".to_string(),
            data: Bytes::from_static(b"x"),
            ..Default::default()
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(status.message().contains("unconfigured"));
    assert!(pubsub.take_published().is_empty());

    let status = RuntimeApi::get_state(
        &runtime,
        Request::new(GetStateRequest {
            store_name: "missing".to_string(),
            key: "k".to_string(),
            ..Default::default()
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(status.message().contains("missing"));
}

#[tokio::test]
async fn test_cloud_event_passthrough_preserves_the_id() {
    let (runtime, pubsub) = test_runtime();

    RuntimeApi::publish_event(
        &runtime,
        Request::new(PublishEventRequest {
            pubsub_name: "p".to_string(),
            topic: "t".to_string(),
            data: Bytes::from_static(
                br#"{"id":"42","source":"test","type":"test.event","specversion":"1.0"}"#,
            ),
            data_content_type: "application/cloudevents+json".to_string(),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    let published = pubsub.take_published();
    assert_eq!(published.len(), 1);

    let envelope: serde_json::Value = serde_json::from_slice(&published[0].data).unwrap();
    assert_eq!(envelope["id"], "42");
    assert_eq!(envelope["topic"], "t");
    assert_eq!(envelope["pubsubname"], "p");
    assert_eq!(envelope["specversion"], "1.0");
}

#[tokio::test]
async fn test_lock_requests_reach_the_backend_namespaced() {
    #[derive(Default)]
    struct RecordingLock {
        seen: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl stores::lock::LockStore for RecordingLock {
        async fn try_lock(&self, req: stores::lock::TryLockRequest) -> stores::Result<bool> {
            self.seen.lock().unwrap().push(req.resource_id);
            Ok(true)
        }
        async fn unlock(
            &self,
            _req: stores::lock::UnlockRequest,
        ) -> stores::Result<stores::lock::UnlockStatus> {
            Ok(stores::lock::UnlockStatus::Success)
        }
    }

    let backend = Arc::new(RecordingLock::default());
    let runtime = Outrigger::builder("A")
        .lock_store("L", backend.clone())
        .build();

    let resp = RuntimeApi::try_lock(
        &runtime,
        Request::new(TryLockRequest {
            store_name: "L".to_string(),
            resource_id: "r1".to_string(),
            lock_owner: "o".to_string(),
            expire: 10,
        }),
    )
    .await
    .unwrap()
    .into_inner();
    assert!(resp.success);

    let seen = backend.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("L"));
    assert!(seen[0].contains("A"));
    assert!(seen[0].contains("r1"));
}

#[tokio::test]
async fn test_weak_sequencer_serves_batches_in_order() {
    struct CountingSequencer {
        inner: MemorySequencer,
        segments: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl stores::sequencer::Sequencer for CountingSequencer {
        async fn next_id(
            &self,
            req: stores::sequencer::NextIdRequest,
        ) -> stores::Result<i64> {
            self.inner.next_id(req).await
        }
        async fn segment(
            &self,
            req: stores::sequencer::NextIdRequest,
            size: i64,
        ) -> stores::Result<Option<stores::sequencer::Segment>> {
            self.segments.fetch_add(1, Ordering::SeqCst);
            self.inner.segment(req, size).await
        }
    }

    let backend = Arc::new(CountingSequencer {
        inner: MemorySequencer::new(),
        segments: AtomicUsize::new(0),
    });
    let runtime = Outrigger::builder("A")
        .sequencer("seq", backend.clone())
        .build();

    for expect in 1..=500i64 {
        let resp = RuntimeApi::get_next_id(
            &runtime,
            Request::new(GetNextIdRequest {
                store_name: "seq".to_string(),
                key: "k".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap()
        .into_inner();
        assert_eq!(resp.next_id, expect);
    }

    assert_eq!(backend.segments.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_subscription_shutdown_stops_every_store_of_the_session() {
    struct CountingConfig {
        stopped: Arc<AtomicUsize>,
    }

    struct Handle {
        stopped: Arc<AtomicUsize>,
    }

    impl stores::config::Subscription for Handle {
        fn stop(self: Box<Self>) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl stores::config::ConfigStore for CountingConfig {
        async fn get(
            &self,
            _req: stores::config::GetRequest,
        ) -> stores::Result<Vec<stores::config::ConfigurationItem>> {
            Ok(Vec::new())
        }
        async fn set(&self, _req: stores::config::SetRequest) -> stores::Result<()> {
            Ok(())
        }
        async fn delete(&self, _req: stores::config::DeleteRequest) -> stores::Result<()> {
            Ok(())
        }
        async fn subscribe(
            &self,
            _req: stores::config::SubscribeRequest,
            _tx: mpsc::Sender<stores::config::ChangeNotification>,
        ) -> stores::Result<Box<dyn stores::config::Subscription>> {
            Ok(Box::new(Handle {
                stopped: Arc::clone(&self.stopped),
            }))
        }
    }

    let stopped_one = Arc::new(AtomicUsize::new(0));
    let stopped_two = Arc::new(AtomicUsize::new(0));
    let runtime = Outrigger::builder("A")
        .config_store(
            "one",
            Arc::new(CountingConfig {
                stopped: Arc::clone(&stopped_one),
            }),
        )
        .config_store(
            "two",
            Arc::new(CountingConfig {
                stopped: Arc::clone(&stopped_two),
            }),
        )
        .build();

    let (req_tx, req_rx) = mpsc::channel(4);
    let mut responses = runtime.subscribe_configuration(ReceiverStream::new(req_rx));

    for store in ["one", "two"] {
        req_tx
            .send(Ok(SubscribeConfigurationRequest {
                store_name: store.to_string(),
                ..Default::default()
            }))
            .await
            .unwrap();
    }
    drop(req_tx); // Close the client end of the session.

    // The RPC finishes cleanly, and by then both stores were stopped exactly
    // once.
    assert!(responses.next().await.is_none());
    assert_eq!(stopped_one.load(Ordering::SeqCst), 1);
    assert_eq!(stopped_two.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_file_transfer_round_trips_byte_identically() {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();

    let (runtime, _) = test_runtime();

    // Upload in uneven frames, including an empty one.
    let frames = vec![
        Ok(PutFileRequest {
            store_name: "f".to_string(),
            name: "blob".to_string(),
            data: Bytes::from_static(b"first-"),
            ..Default::default()
        }),
        Ok(PutFileRequest {
            data: Bytes::new(),
            ..Default::default()
        }),
        Ok(PutFileRequest {
            data: Bytes::from(vec![7u8; 300_000]),
            ..Default::default()
        }),
    ];
    runtime
        .put_file(futures::stream::iter(frames))
        .await
        .unwrap();

    let stream = runtime
        .get_file(GetFileRequest {
            store_name: "f".to_string(),
            name: "blob".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let chunks: Vec<Bytes> = stream.map(|c| c.unwrap().data).collect().await;

    // Several chunks, since the object exceeds one pooled buffer.
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| !c.is_empty()));

    let mut expect = b"first-".to_vec();
    expect.extend_from_slice(&[7u8; 300_000]);
    assert_eq!(chunks.concat(), expect);
}
