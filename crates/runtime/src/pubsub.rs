use crate::Outrigger;
use proto_outrigger::runtime::{PublishEventRequest, PublishEventResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stores::{pubsub, Feature};
use tonic::Status;

/// Media type marking a payload that already is an envelope.
const CLOUD_EVENTS_JSON: &str = "application/cloudevents+json";
const DEFAULT_CONTENT_TYPE: &str = "text/plain";
const DEFAULT_EVENT_TYPE: &str = "io.outrigger.event.sent";
const SPEC_VERSION: &str = "1.0";

/// Publish the caller's bytes as-is, with no envelope.
const RAW_PAYLOAD_METADATA: &str = "rawPayload";
/// Seconds until the message may be dropped. Handled by the runtime only
/// when the component does not handle it itself.
const TTL_METADATA: &str = "ttlInSeconds";

/// The envelope wrapped around every published payload. Payloads that are
/// already CloudEvents pass through with only `topic` and `pubsubname`
/// filled; unknown attributes of such payloads ride along in `extensions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudEvent {
    pub id: String,
    pub source: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub specversion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacontenttype: Option<String>,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub pubsubname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_base64: Option<String>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl Outrigger {
    /// Wrap `data` in a CloudEvents envelope (or pass an existing one
    /// through), apply the component's feature-directed post-processing, and
    /// publish. Absent data publishes a valid envelope with an empty payload.
    pub async fn publish_event(
        &self,
        req: PublishEventRequest,
    ) -> Result<PublishEventResponse, Status> {
        if req.pubsub_name.is_empty() {
            return Err(Status::invalid_argument("pubsub name is empty"));
        }
        if req.topic.is_empty() {
            return Err(Status::invalid_argument("topic is empty"));
        }
        let component = self.inner.pubsubs.lookup(&req.pubsub_name)?;

        // The raw-payload escape hatch skips the envelope entirely.
        if req.metadata.get(RAW_PAYLOAD_METADATA).map(String::as_str) == Some("true") {
            tracing::debug!(topic = %req.topic, "publishing raw payload");
            return component
                .publish(pubsub::PublishRequest {
                    topic: req.topic.clone(),
                    data: req.data,
                    metadata: req.metadata,
                })
                .await
                .map(|()| PublishEventResponse {})
                .map_err(|err| {
                    Status::internal(format!("publishing to topic '{}': {err}", req.topic))
                });
        }

        let mut envelope = if req.data_content_type == CLOUD_EVENTS_JSON {
            let mut envelope: CloudEvent = serde_json::from_slice(&req.data)
                .map_err(|err| Status::invalid_argument(format!("decoding CloudEvent: {err}")))?;
            if envelope.id.is_empty() {
                return Err(Status::invalid_argument("CloudEvent id is empty"));
            }
            envelope.topic = req.topic.clone();
            envelope.pubsubname = req.pubsub_name.clone();
            envelope
        } else {
            new_envelope(&req, self.app_id())?
        };

        if let Some(ttl) = req.metadata.get(TTL_METADATA) {
            if !component.features().contains(&Feature::MessageTtl) {
                envelope.expiration = Some(expiration_from_ttl(ttl)?);
            }
        }

        let serialized = serde_json::to_vec(&envelope)
            .map_err(|err| Status::invalid_argument(format!("encoding CloudEvent: {err}")))?;

        component
            .publish(pubsub::PublishRequest {
                topic: req.topic.clone(),
                data: serialized.into(),
                metadata: req.metadata,
            })
            .await
            .map_err(|err| Status::internal(format!("publishing to topic '{}': {err}", req.topic)))?;

        Ok(PublishEventResponse {})
    }
}

fn new_envelope(req: &PublishEventRequest, source: &str) -> Result<CloudEvent, Status> {
    let content_type = if req.data_content_type.is_empty() {
        DEFAULT_CONTENT_TYPE.to_string()
    } else {
        req.data_content_type.clone()
    };

    // JSON payloads embed as structured data, textual payloads as a string,
    // and anything else rides in `data_base64`.
    let (data, data_base64) = if content_type == "application/json"
        || content_type.ends_with("+json")
    {
        let value = serde_json::from_slice(&req.data)
            .map_err(|err| Status::invalid_argument(format!("decoding JSON payload: {err}")))?;
        (Some(value), None)
    } else if let Ok(text) = std::str::from_utf8(&req.data) {
        (Some(serde_json::Value::String(text.to_string())), None)
    } else {
        (None, Some(base64::encode(&req.data)))
    };

    Ok(CloudEvent {
        id: uuid::Uuid::new_v4().to_string(),
        source: source.to_string(),
        event_type: DEFAULT_EVENT_TYPE.to_string(),
        specversion: SPEC_VERSION.to_string(),
        datacontenttype: Some(content_type),
        topic: req.topic.clone(),
        pubsubname: req.pubsub_name.clone(),
        expiration: None,
        data,
        data_base64,
        extensions: BTreeMap::new(),
    })
}

fn expiration_from_ttl(ttl: &str) -> Result<String, Status> {
    let seconds: i64 = ttl
        .parse()
        .map_err(|_| Status::invalid_argument("ttlInSeconds is not an integer"))?;

    let expiration = time::OffsetDateTime::now_utc() + time::Duration::seconds(seconds);
    expiration
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|err| Status::internal(format!("formatting expiration: {err}")))
}
