use crate::errors::component_status;
use crate::Outrigger;
use futures::{Stream, StreamExt};
use proto_outrigger::runtime::{
    ConfigurationItem, DeleteConfigurationRequest, DeleteConfigurationResponse,
    GetConfigurationRequest, GetConfigurationResponse, SaveConfigurationRequest,
    SaveConfigurationResponse, SubscribeConfigurationRequest, SubscribeConfigurationResponse,
};
use stores::config::{self, ConfigStore, Subscription};
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::ReceiverStream;
use tonic::Status;

impl Outrigger {
    pub async fn get_configuration(
        &self,
        req: GetConfigurationRequest,
    ) -> Result<GetConfigurationResponse, Status> {
        let store = self.inner.config_stores.get(&req.store_name)?;
        let (group, label) = normalized_scope(&req.group, &req.label, store.as_ref());

        let items = store
            .get(config::GetRequest {
                app_id: self.scoped_app_id(&req.app_id),
                group,
                label,
                keys: req.keys,
                metadata: req.metadata,
            })
            .await
            .map_err(|err| component_status("getting configuration", err))?;

        Ok(GetConfigurationResponse {
            items: items.into_iter().map(item_to_wire).collect(),
        })
    }

    pub async fn save_configuration(
        &self,
        req: SaveConfigurationRequest,
    ) -> Result<SaveConfigurationResponse, Status> {
        let store = self.inner.config_stores.get(&req.store_name)?;

        // Each item is normalized independently: components never see a
        // blank group or label.
        let items = req
            .items
            .into_iter()
            .map(|item| {
                let (group, label) = normalized_scope(&item.group, &item.label, store.as_ref());
                config::ConfigurationItem {
                    key: item.key,
                    content: item.content,
                    group,
                    label,
                    tags: item.tags,
                    metadata: item.metadata,
                }
            })
            .collect();

        store
            .set(config::SetRequest {
                app_id: self.scoped_app_id(&req.app_id),
                items,
            })
            .await
            .map_err(|err| component_status("saving configuration", err))?;

        Ok(SaveConfigurationResponse {})
    }

    pub async fn delete_configuration(
        &self,
        req: DeleteConfigurationRequest,
    ) -> Result<DeleteConfigurationResponse, Status> {
        let store = self.inner.config_stores.get(&req.store_name)?;
        let (group, label) = normalized_scope(&req.group, &req.label, store.as_ref());

        store
            .delete(config::DeleteRequest {
                app_id: self.scoped_app_id(&req.app_id),
                group,
                label,
                keys: req.keys,
                metadata: req.metadata,
            })
            .await
            .map_err(|err| component_status("deleting configuration", err))?;

        Ok(DeleteConfigurationResponse {})
    }

    /// The bidi subscription engine. Two tasks cooperate per stream: a reader
    /// consuming subscribe requests and opening component feeds onto one
    /// shared channel, and a writer draining that channel onto the wire.
    ///
    /// Teardown is session-scoped and ordered: on any reader-side error or a
    /// clean client close, the reader stops every feed it opened, signals the
    /// writer, and the session reports the reader's error (if any) as the
    /// stream's final status once both tasks have finished.
    pub fn subscribe_configuration<S>(
        &self,
        requests: S,
    ) -> ReceiverStream<Result<SubscribeConfigurationResponse, Status>>
    where
        S: Stream<Item = Result<SubscribeConfigurationRequest, Status>> + Send + Unpin + 'static,
    {
        let (out_tx, out_rx) = mpsc::channel(16);
        let (change_tx, mut change_rx) = mpsc::channel::<config::ChangeNotification>(64);
        let (exit_tx, mut exit_rx) = oneshot::channel::<()>();

        let this = self.clone();
        let reader = tokio::spawn(async move {
            let mut requests = requests;
            let mut session: Vec<Box<dyn Subscription>> = Vec::new();
            let mut error = None;

            loop {
                match requests.next().await {
                    Some(Ok(req)) => match this.open_subscription(req, change_tx.clone()).await {
                        Ok(subscription) => session.push(subscription),
                        Err(status) => {
                            error = Some(status);
                            break;
                        }
                    },
                    Some(Err(status)) => {
                        error = Some(status);
                        break;
                    }
                    None => break, // Clean client close.
                }
            }

            tracing::debug!(
                subscriptions = session.len(),
                error = ?error,
                "configuration subscription session closing"
            );
            for subscription in session {
                subscription.stop();
            }
            // Dropping our template sender lets the channel close once every
            // per-feed clone is gone; the exit signal covers feeds which
            // out-live their component's courtesy.
            drop(change_tx);
            let _ = exit_tx.send(());

            error
        });

        let app_id = self.inner.app_id.clone();
        let writer_tx = out_tx.clone();
        let writer = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut exit_rx => break,
                    notification = change_rx.recv() => {
                        let Some(notification) = notification else { break };
                        let response = SubscribeConfigurationResponse {
                            store_name: notification.store_name,
                            app_id: app_id.clone(),
                            items: notification.items.into_iter().map(item_to_wire).collect(),
                        };
                        if writer_tx.send(Ok(response)).await.is_err() {
                            break; // Client went away.
                        }
                    }
                }
            }
        });

        // The RPC completes only once both tasks have; its final status is
        // whatever the reader recorded.
        tokio::spawn(async move {
            let (reader, _writer) = tokio::join!(reader, writer);
            match reader {
                Ok(Some(status)) => {
                    let _ = out_tx.send(Err(status)).await;
                }
                Ok(None) => (),
                Err(join_error) => {
                    let _ = out_tx
                        .send(Err(Status::internal(format!(
                            "subscription reader failed: {join_error}"
                        ))))
                        .await;
                }
            }
        });

        ReceiverStream::new(out_rx)
    }

    async fn open_subscription(
        &self,
        req: SubscribeConfigurationRequest,
        tx: mpsc::Sender<config::ChangeNotification>,
    ) -> Result<Box<dyn Subscription>, Status> {
        let store = self.inner.config_stores.get(&req.store_name)?;
        let (group, label) = normalized_scope(&req.group, &req.label, store.as_ref());

        let subscription = store
            .subscribe(
                config::SubscribeRequest {
                    store_name: req.store_name.clone(),
                    app_id: self.scoped_app_id(&req.app_id),
                    group,
                    label,
                    keys: req.keys,
                    metadata: req.metadata,
                },
                tx,
            )
            .await
            .map_err(|err| component_status("subscribing to configuration", err))?;

        tracing::debug!(store = %req.store_name, "opened configuration subscription");
        Ok(subscription)
    }

    fn scoped_app_id(&self, req_app_id: &str) -> String {
        if req_app_id.is_empty() {
            self.inner.app_id.clone()
        } else {
            req_app_id.to_string()
        }
    }
}

/// Blank-after-trim group or label falls back to the component's default;
/// anything else passes through untouched.
fn normalized_scope(group: &str, label: &str, store: &dyn ConfigStore) -> (String, String) {
    let group = if group.trim().is_empty() {
        store.default_group().to_string()
    } else {
        group.to_string()
    };
    let label = if label.trim().is_empty() {
        store.default_label().to_string()
    } else {
        label.to_string()
    };
    (group, label)
}

fn item_to_wire(item: config::ConfigurationItem) -> ConfigurationItem {
    ConfigurationItem {
        key: item.key,
        content: item.content,
        group: item.group,
        label: item.label,
        tags: item.tags,
        metadata: item.metadata,
    }
}
