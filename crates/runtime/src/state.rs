use crate::errors::component_status;
use crate::Outrigger;
use futures::StreamExt;
use proto_outrigger::runtime::{
    BulkStateItem, DeleteBulkStateRequest, DeleteBulkStateResponse, DeleteStateRequest,
    DeleteStateResponse, ExecuteStateTransactionRequest, ExecuteStateTransactionResponse,
    GetBulkStateRequest, GetBulkStateResponse, GetStateRequest, GetStateResponse,
    SaveStateRequest, SaveStateResponse, StateItem,
};
use std::sync::Arc;
use stores::state::{self, StateStore, TransactionOperation};
use stores::Feature;
use tonic::Status;

/// Concurrent component gets used for a bulk read when the request does not
/// pick its own parallelism.
const DEFAULT_BULK_PARALLELISM: usize = 10;

impl Outrigger {
    pub async fn get_state(&self, req: GetStateRequest) -> Result<GetStateResponse, Status> {
        let store = self.inner.state_stores.get(&req.store_name)?;
        if req.key.is_empty() {
            return Err(Status::invalid_argument("state key is empty"));
        }

        let got = store
            .get(state::GetRequest {
                key: req.key,
                metadata: req.metadata,
            })
            .await
            .map_err(|err| component_status("getting state", err))?;

        // An absent key is an empty value, not an error.
        Ok(match got {
            Some(resp) => GetStateResponse {
                data: resp.data,
                etag: resp.etag.unwrap_or_default(),
                metadata: resp.metadata,
            },
            None => GetStateResponse::default(),
        })
    }

    pub async fn get_bulk_state(
        &self,
        req: GetBulkStateRequest,
    ) -> Result<GetBulkStateResponse, Status> {
        let store = self.inner.state_stores.get(&req.store_name)?;
        if req.keys.is_empty() {
            return Ok(GetBulkStateResponse::default());
        }

        let requests: Vec<state::GetRequest> = req
            .keys
            .iter()
            .map(|key| state::GetRequest {
                key: key.clone(),
                metadata: req.metadata.clone(),
            })
            .collect();

        // Prefer the component's native bulk path; fan out over single gets
        // with bounded concurrency when it has none. Per-key failures are
        // reported in the item, not as a failure of the whole call.
        if let Some(results) = store
            .bulk_get(requests.clone())
            .await
            .map_err(|err| component_status("getting bulk state", err))?
        {
            let items = req
                .keys
                .into_iter()
                .zip(results)
                .map(|(key, got)| bulk_item(key, Ok(got)))
                .collect();
            return Ok(GetBulkStateResponse { items });
        }

        let parallelism = if req.parallelism > 0 {
            req.parallelism as usize
        } else {
            DEFAULT_BULK_PARALLELISM
        };

        let items = futures::stream::iter(requests.into_iter().map(|get| {
            let store = Arc::clone(store);
            async move {
                let key = get.key.clone();
                let result = store.get(get).await;
                bulk_item(key, result)
            }
        }))
        .buffered(parallelism)
        .collect()
        .await;

        Ok(GetBulkStateResponse { items })
    }

    pub async fn save_state(&self, req: SaveStateRequest) -> Result<SaveStateResponse, Status> {
        let store = self.inner.state_stores.get(&req.store_name)?;

        for item in req.states {
            let set = into_set_request(&req.store_name, store.features(), item)?;
            store
                .set(set)
                .await
                .map_err(|err| component_status("saving state", err))?;
        }
        Ok(SaveStateResponse {})
    }

    pub async fn delete_state(
        &self,
        req: DeleteStateRequest,
    ) -> Result<DeleteStateResponse, Status> {
        let store = self.inner.state_stores.get(&req.store_name)?;
        if req.key.is_empty() {
            return Err(Status::invalid_argument("state key is empty"));
        }
        let etag = check_etag_support(
            &req.store_name,
            store.features(),
            req.etag.map(|e| e.value),
        )?;

        store
            .delete(state::DeleteRequest {
                key: req.key,
                etag,
                metadata: req.metadata,
            })
            .await
            .map_err(|err| component_status("deleting state", err))?;

        Ok(DeleteStateResponse {})
    }

    pub async fn delete_bulk_state(
        &self,
        req: DeleteBulkStateRequest,
    ) -> Result<DeleteBulkStateResponse, Status> {
        let store = self.inner.state_stores.get(&req.store_name)?;

        let mut deletes = Vec::with_capacity(req.states.len());
        for item in req.states {
            if item.key.is_empty() {
                return Err(Status::invalid_argument("state key is empty"));
            }
            let etag = check_etag_support(
                &req.store_name,
                store.features(),
                item.etag.map(|e| e.value),
            )?;
            deletes.push(state::DeleteRequest {
                key: item.key,
                etag,
                metadata: item.metadata,
            });
        }

        store
            .bulk_delete(deletes)
            .await
            .map_err(|err| component_status("deleting bulk state", err))?;

        Ok(DeleteBulkStateResponse {})
    }

    pub async fn execute_state_transaction(
        &self,
        req: ExecuteStateTransactionRequest,
    ) -> Result<ExecuteStateTransactionResponse, Status> {
        let store = self
            .inner
            .transactional_state_stores
            .get(&req.store_name)?;

        let mut operations = Vec::with_capacity(req.operations.len());
        for op in req.operations {
            let item = op
                .request
                .ok_or_else(|| Status::invalid_argument("transaction operation request is nil"))?;

            match op.operation_type.as_str() {
                "upsert" => operations.push(TransactionOperation::Upsert(into_set_request(
                    &req.store_name,
                    store.features(),
                    item,
                )?)),
                "delete" => {
                    if item.key.is_empty() {
                        return Err(Status::invalid_argument("state key is empty"));
                    }
                    let etag = check_etag_support(
                        &req.store_name,
                        store.features(),
                        item.etag.map(|e| e.value),
                    )?;
                    operations.push(TransactionOperation::Delete(state::DeleteRequest {
                        key: item.key,
                        etag,
                        metadata: item.metadata,
                    }));
                }
                other => {
                    return Err(Status::invalid_argument(format!(
                        "unsupported transaction operation type '{other}'"
                    )));
                }
            }
        }

        store
            .transact(operations, req.metadata)
            .await
            .map_err(|err| component_status("executing state transaction", err))?;

        Ok(ExecuteStateTransactionResponse {})
    }
}

fn bulk_item(key: String, result: stores::Result<Option<state::GetResponse>>) -> BulkStateItem {
    match result {
        Ok(Some(resp)) => BulkStateItem {
            key,
            data: resp.data,
            etag: resp.etag.unwrap_or_default(),
            error: String::new(),
            metadata: resp.metadata,
        },
        Ok(None) => BulkStateItem {
            key,
            ..Default::default()
        },
        Err(err) => BulkStateItem {
            key,
            error: err.to_string(),
            ..Default::default()
        },
    }
}

fn into_set_request(
    store_name: &str,
    features: &[Feature],
    item: StateItem,
) -> Result<state::SetRequest, Status> {
    if item.key.is_empty() {
        return Err(Status::invalid_argument("state key is empty"));
    }
    let etag = check_etag_support(store_name, features, item.etag.map(|e| e.value))?;

    Ok(state::SetRequest {
        key: item.key,
        value: item.value,
        etag,
        metadata: item.metadata,
    })
}

/// Conditional writes require the component to have reported the etag
/// capability at construction.
fn check_etag_support(
    store_name: &str,
    features: &[Feature],
    etag: Option<String>,
) -> Result<Option<String>, Status> {
    match etag {
        Some(etag) if !features.contains(&Feature::Etag) => Err(Status::invalid_argument(format!(
            "state store '{store_name}' does not support etags"
        ))),
        etag => Ok(etag),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;
    use proto_outrigger::runtime::{Etag, TransactionalStateOperation};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stores::memory::MemoryState;

    fn runtime() -> Outrigger {
        Outrigger::builder("test-app")
            .transactional_state_store("s", Arc::new(MemoryState::new()))
            .build()
    }

    fn save(key: &str, value: &'static [u8]) -> SaveStateRequest {
        SaveStateRequest {
            store_name: "s".to_string(),
            states: vec![StateItem {
                key: key.to_string(),
                value: Bytes::from_static(value),
                ..Default::default()
            }],
        }
    }

    #[tokio::test]
    async fn test_state_round_trip() {
        let runtime = runtime();

        runtime.save_state(save("k", b"\x01")).await.unwrap();

        let got = runtime
            .get_state(GetStateRequest {
                store_name: "s".to_string(),
                key: "k".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(got.data, Bytes::from_static(b"\x01"));
        assert!(!got.etag.is_empty());

        runtime
            .delete_state(DeleteStateRequest {
                store_name: "s".to_string(),
                key: "k".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let got = runtime
            .get_state(GetStateRequest {
                store_name: "s".to_string(),
                key: "k".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(got.data.is_empty());
        assert!(got.etag.is_empty());
    }

    #[tokio::test]
    async fn test_stale_etag_aborts() {
        let runtime = runtime();
        runtime.save_state(save("k", b"v1")).await.unwrap();

        let mut req = save("k", b"v2");
        req.states[0].etag = Some(Etag {
            value: "99".to_string(),
        });
        let status = runtime.save_state(req).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::Aborted);
    }

    #[tokio::test]
    async fn test_bulk_get_fans_out_and_reports_per_key_errors() {
        /// Fails every get of the key "poison"; counts gets to show the
        /// fan-out path was taken.
        struct FlakyState {
            inner: MemoryState,
            gets: AtomicUsize,
        }

        #[async_trait::async_trait]
        impl StateStore for FlakyState {
            fn features(&self) -> &[Feature] {
                self.inner.features()
            }
            async fn get(
                &self,
                req: state::GetRequest,
            ) -> stores::Result<Option<state::GetResponse>> {
                self.gets.fetch_add(1, Ordering::SeqCst);
                if req.key == "poison" {
                    return Err(stores::Error::Internal(anyhow::anyhow!("poisoned key")));
                }
                self.inner.get(req).await
            }
            async fn set(&self, req: state::SetRequest) -> stores::Result<()> {
                self.inner.set(req).await
            }
            async fn delete(&self, req: state::DeleteRequest) -> stores::Result<()> {
                self.inner.delete(req).await
            }
        }

        let store = Arc::new(FlakyState {
            inner: MemoryState::new(),
            gets: AtomicUsize::new(0),
        });
        let runtime = Outrigger::builder("test-app")
            .state_store("s", store.clone())
            .build();

        runtime.save_state(save("a", b"1")).await.unwrap();

        let got = runtime
            .get_bulk_state(GetBulkStateRequest {
                store_name: "s".to_string(),
                keys: vec!["a".to_string(), "missing".to_string(), "poison".to_string()],
                parallelism: 2,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(got.items.len(), 3);
        assert_eq!(got.items[0].key, "a");
        assert_eq!(got.items[0].data, Bytes::from_static(b"1"));
        assert_eq!(got.items[1].key, "missing");
        assert!(got.items[1].data.is_empty());
        assert!(got.items[1].error.is_empty());
        assert_eq!(got.items[2].key, "poison");
        assert!(got.items[2].error.contains("poisoned key"));
        assert_eq!(store.gets.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transaction_validates_operation_shape() {
        let runtime = runtime();

        let status = runtime
            .execute_state_transaction(ExecuteStateTransactionRequest {
                store_name: "s".to_string(),
                operations: vec![TransactionalStateOperation {
                    operation_type: "upsert".to_string(),
                    request: None,
                }],
                ..Default::default()
            })
            .await
            .unwrap_err();
        insta::assert_snapshot!(status.message(), @"transaction operation request is nil");

        let status = runtime
            .execute_state_transaction(ExecuteStateTransactionRequest {
                store_name: "s".to_string(),
                operations: vec![TransactionalStateOperation {
                    operation_type: "merge".to_string(),
                    request: Some(StateItem {
                        key: "k".to_string(),
                        ..Default::default()
                    }),
                }],
                ..Default::default()
            })
            .await
            .unwrap_err();
        insta::assert_snapshot!(
            status.message(),
            @"unsupported transaction operation type 'merge'"
        );
    }

    #[tokio::test]
    async fn test_transaction_applies_upserts_and_deletes() {
        let runtime = runtime();
        runtime.save_state(save("gone", b"x")).await.unwrap();

        runtime
            .execute_state_transaction(ExecuteStateTransactionRequest {
                store_name: "s".to_string(),
                operations: vec![
                    TransactionalStateOperation {
                        operation_type: "upsert".to_string(),
                        request: Some(StateItem {
                            key: "fresh".to_string(),
                            value: Bytes::from_static(b"y"),
                            ..Default::default()
                        }),
                    },
                    TransactionalStateOperation {
                        operation_type: "delete".to_string(),
                        request: Some(StateItem {
                            key: "gone".to_string(),
                            ..Default::default()
                        }),
                    },
                ],
                ..Default::default()
            })
            .await
            .unwrap();

        let fresh = runtime
            .get_state(GetStateRequest {
                store_name: "s".to_string(),
                key: "fresh".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(fresh.data, Bytes::from_static(b"y"));

        let gone = runtime
            .get_state(GetStateRequest {
                store_name: "s".to_string(),
                key: "gone".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(gone.data.is_empty());
    }
}
