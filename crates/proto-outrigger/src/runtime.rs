//! Messages and the server trait of the `outrigger.runtime.v1.Runtime`
//! service. Field numbers track `proto/runtime.proto`.

use std::collections::HashMap;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SayHelloRequest {
    #[prost(string, tag = "1")]
    pub service_name: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SayHelloResponse {
    #[prost(string, tag = "1")]
    pub hello: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommonInvokeRequest {
    #[prost(string, tag = "1")]
    pub method: String,
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::prost::bytes::Bytes,
    #[prost(string, tag = "3")]
    pub content_type: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InvokeServiceRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub message: Option<CommonInvokeRequest>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InvokeResponse {
    #[prost(bytes = "bytes", tag = "1")]
    pub data: ::prost::bytes::Bytes,
    #[prost(string, tag = "2")]
    pub content_type: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConfigurationItem {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub content: String,
    #[prost(string, tag = "3")]
    pub group: String,
    #[prost(string, tag = "4")]
    pub label: String,
    #[prost(map = "string, string", tag = "5")]
    pub tags: HashMap<String, String>,
    #[prost(map = "string, string", tag = "6")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetConfigurationRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub app_id: String,
    #[prost(string, tag = "3")]
    pub group: String,
    #[prost(string, tag = "4")]
    pub label: String,
    #[prost(string, repeated, tag = "5")]
    pub keys: Vec<String>,
    #[prost(map = "string, string", tag = "6")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetConfigurationResponse {
    #[prost(message, repeated, tag = "1")]
    pub items: Vec<ConfigurationItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SaveConfigurationRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub app_id: String,
    #[prost(message, repeated, tag = "3")]
    pub items: Vec<ConfigurationItem>,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SaveConfigurationResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteConfigurationRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub app_id: String,
    #[prost(string, tag = "3")]
    pub group: String,
    #[prost(string, tag = "4")]
    pub label: String,
    #[prost(string, repeated, tag = "5")]
    pub keys: Vec<String>,
    #[prost(map = "string, string", tag = "6")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteConfigurationResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscribeConfigurationRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub app_id: String,
    #[prost(string, tag = "3")]
    pub group: String,
    #[prost(string, tag = "4")]
    pub label: String,
    #[prost(string, repeated, tag = "5")]
    pub keys: Vec<String>,
    #[prost(map = "string, string", tag = "6")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscribeConfigurationResponse {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub app_id: String,
    #[prost(message, repeated, tag = "3")]
    pub items: Vec<ConfigurationItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublishEventRequest {
    #[prost(string, tag = "1")]
    pub pubsub_name: String,
    #[prost(string, tag = "2")]
    pub topic: String,
    #[prost(bytes = "bytes", tag = "3")]
    pub data: ::prost::bytes::Bytes,
    #[prost(string, tag = "4")]
    pub data_content_type: String,
    #[prost(map = "string, string", tag = "5")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublishEventResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetStateResponse {
    #[prost(bytes = "bytes", tag = "1")]
    pub data: ::prost::bytes::Bytes,
    #[prost(string, tag = "2")]
    pub etag: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBulkStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, repeated, tag = "2")]
    pub keys: Vec<String>,
    #[prost(int32, tag = "3")]
    pub parallelism: i32,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BulkStateItem {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::prost::bytes::Bytes,
    #[prost(string, tag = "3")]
    pub etag: String,
    #[prost(string, tag = "4")]
    pub error: String,
    #[prost(map = "string, string", tag = "5")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBulkStateResponse {
    #[prost(message, repeated, tag = "1")]
    pub items: Vec<BulkStateItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Etag {
    #[prost(string, tag = "1")]
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum StateConcurrency {
    ConcurrencyUnspecified = 0,
    ConcurrencyFirstWrite = 1,
    ConcurrencyLastWrite = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum StateConsistency {
    ConsistencyUnspecified = 0,
    ConsistencyEventual = 1,
    ConsistencyStrong = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateOptions {
    #[prost(enumeration = "StateConcurrency", tag = "1")]
    pub concurrency: i32,
    #[prost(enumeration = "StateConsistency", tag = "2")]
    pub consistency: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateItem {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(bytes = "bytes", tag = "2")]
    pub value: ::prost::bytes::Bytes,
    #[prost(message, optional, tag = "3")]
    pub etag: Option<Etag>,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
    #[prost(message, optional, tag = "5")]
    pub options: Option<StateOptions>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SaveStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(message, repeated, tag = "2")]
    pub states: Vec<StateItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SaveStateResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(message, optional, tag = "3")]
    pub etag: Option<Etag>,
    #[prost(message, optional, tag = "4")]
    pub options: Option<StateOptions>,
    #[prost(map = "string, string", tag = "5")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteStateResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteBulkStateRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(message, repeated, tag = "2")]
    pub states: Vec<StateItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteBulkStateResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionalStateOperation {
    /// Either "upsert" or "delete".
    #[prost(string, tag = "1")]
    pub operation_type: String,
    #[prost(message, optional, tag = "2")]
    pub request: Option<StateItem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteStateTransactionRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(message, repeated, tag = "2")]
    pub operations: Vec<TransactionalStateOperation>,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteStateTransactionResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFileRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFileResponse {
    #[prost(bytes = "bytes", tag = "1")]
    pub data: ::prost::bytes::Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutFileRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(bytes = "bytes", tag = "3")]
    pub data: ::prost::bytes::Bytes,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutFileResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListFileRequest {
    #[prost(message, optional, tag = "1")]
    pub request: Option<FileRequest>,
    #[prost(int32, tag = "2")]
    pub page_size: i32,
    #[prost(string, tag = "3")]
    pub marker: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileInfo {
    #[prost(string, tag = "1")]
    pub file_name: String,
    #[prost(int64, tag = "2")]
    pub size: i64,
    #[prost(string, tag = "3")]
    pub last_modified: String,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListFileResponse {
    #[prost(message, repeated, tag = "1")]
    pub files: Vec<FileInfo>,
    #[prost(string, tag = "2")]
    pub marker: String,
    #[prost(bool, tag = "3")]
    pub is_truncated: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DelFileRequest {
    #[prost(message, optional, tag = "1")]
    pub request: Option<FileRequest>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DelFileResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFileMetaRequest {
    #[prost(message, optional, tag = "1")]
    pub request: Option<FileRequest>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFileMetaResponse {
    #[prost(int64, tag = "1")]
    pub size: i64,
    #[prost(string, tag = "2")]
    pub last_modified: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TryLockRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub resource_id: String,
    #[prost(string, tag = "3")]
    pub lock_owner: String,
    /// Expiration in seconds. Must be positive.
    #[prost(int32, tag = "4")]
    pub expire: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TryLockResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnlockRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub resource_id: String,
    #[prost(string, tag = "3")]
    pub lock_owner: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum UnlockStatus {
    UnlockSuccess = 0,
    UnlockLockUnexist = 1,
    UnlockLockBelongToOthers = 2,
    UnlockInternalError = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnlockResponse {
    #[prost(enumeration = "UnlockStatus", tag = "1")]
    pub status: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AutoIncrement {
    Weak = 0,
    Strong = 1,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SequencerOptions {
    #[prost(enumeration = "AutoIncrement", tag = "1")]
    pub increment: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetNextIdRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(message, optional, tag = "3")]
    pub options: Option<SequencerOptions>,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetNextIdResponse {
    #[prost(int64, tag = "1")]
    pub next_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InvokeBindingRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::prost::bytes::Bytes,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
    #[prost(string, tag = "4")]
    pub operation: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InvokeBindingResponse {
    #[prost(bytes = "bytes", tag = "1")]
    pub data: ::prost::bytes::Bytes,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSecretRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSecretResponse {
    #[prost(map = "string, string", tag = "1")]
    pub data: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBulkSecretRequest {
    #[prost(string, tag = "1")]
    pub store_name: String,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SecretResponse {
    #[prost(map = "string, string", tag = "1")]
    pub secrets: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBulkSecretResponse {
    #[prost(map = "string, message", tag = "1")]
    pub data: HashMap<String, SecretResponse>,
}

pub mod runtime_server {
    //! Server-side trait of the `Runtime` service, in the shape tonic's
    //! codegen would hand an implementor.

    use super::*;
    use tonic::{Request, Response, Status, Streaming};

    #[tonic::async_trait]
    pub trait Runtime: Send + Sync + 'static {
        async fn say_hello(
            &self,
            request: Request<SayHelloRequest>,
        ) -> Result<Response<SayHelloResponse>, Status>;

        async fn invoke_service(
            &self,
            request: Request<InvokeServiceRequest>,
        ) -> Result<Response<InvokeResponse>, Status>;

        async fn get_configuration(
            &self,
            request: Request<GetConfigurationRequest>,
        ) -> Result<Response<GetConfigurationResponse>, Status>;

        async fn save_configuration(
            &self,
            request: Request<SaveConfigurationRequest>,
        ) -> Result<Response<SaveConfigurationResponse>, Status>;

        async fn delete_configuration(
            &self,
            request: Request<DeleteConfigurationRequest>,
        ) -> Result<Response<DeleteConfigurationResponse>, Status>;

        /// Server streaming response type for the SubscribeConfiguration method.
        type SubscribeConfigurationStream: futures_core::Stream<Item = Result<SubscribeConfigurationResponse, Status>>
            + Send
            + 'static;

        async fn subscribe_configuration(
            &self,
            request: Request<Streaming<SubscribeConfigurationRequest>>,
        ) -> Result<Response<Self::SubscribeConfigurationStream>, Status>;

        async fn publish_event(
            &self,
            request: Request<PublishEventRequest>,
        ) -> Result<Response<PublishEventResponse>, Status>;

        async fn get_state(
            &self,
            request: Request<GetStateRequest>,
        ) -> Result<Response<GetStateResponse>, Status>;

        async fn get_bulk_state(
            &self,
            request: Request<GetBulkStateRequest>,
        ) -> Result<Response<GetBulkStateResponse>, Status>;

        async fn save_state(
            &self,
            request: Request<SaveStateRequest>,
        ) -> Result<Response<SaveStateResponse>, Status>;

        async fn delete_state(
            &self,
            request: Request<DeleteStateRequest>,
        ) -> Result<Response<DeleteStateResponse>, Status>;

        async fn delete_bulk_state(
            &self,
            request: Request<DeleteBulkStateRequest>,
        ) -> Result<Response<DeleteBulkStateResponse>, Status>;

        async fn execute_state_transaction(
            &self,
            request: Request<ExecuteStateTransactionRequest>,
        ) -> Result<Response<ExecuteStateTransactionResponse>, Status>;

        /// Server streaming response type for the GetFile method.
        type GetFileStream: futures_core::Stream<Item = Result<GetFileResponse, Status>>
            + Send
            + 'static;

        async fn get_file(
            &self,
            request: Request<GetFileRequest>,
        ) -> Result<Response<Self::GetFileStream>, Status>;

        async fn put_file(
            &self,
            request: Request<Streaming<PutFileRequest>>,
        ) -> Result<Response<PutFileResponse>, Status>;

        async fn list_file(
            &self,
            request: Request<ListFileRequest>,
        ) -> Result<Response<ListFileResponse>, Status>;

        async fn del_file(
            &self,
            request: Request<DelFileRequest>,
        ) -> Result<Response<DelFileResponse>, Status>;

        async fn get_file_meta(
            &self,
            request: Request<GetFileMetaRequest>,
        ) -> Result<Response<GetFileMetaResponse>, Status>;

        async fn try_lock(
            &self,
            request: Request<TryLockRequest>,
        ) -> Result<Response<TryLockResponse>, Status>;

        async fn unlock(
            &self,
            request: Request<UnlockRequest>,
        ) -> Result<Response<UnlockResponse>, Status>;

        async fn get_next_id(
            &self,
            request: Request<GetNextIdRequest>,
        ) -> Result<Response<GetNextIdResponse>, Status>;

        async fn invoke_binding(
            &self,
            request: Request<InvokeBindingRequest>,
        ) -> Result<Response<InvokeBindingResponse>, Status>;

        async fn get_secret(
            &self,
            request: Request<GetSecretRequest>,
        ) -> Result<Response<GetSecretResponse>, Status>;

        async fn get_bulk_secret(
            &self,
            request: Request<GetBulkSecretRequest>,
        ) -> Result<Response<GetBulkSecretResponse>, Status>;
    }
}
