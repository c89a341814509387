use crate::Outrigger;
use proto_outrigger::runtime::{
    GetBulkSecretRequest, GetBulkSecretResponse, GetSecretRequest, GetSecretResponse,
    InvokeBindingRequest, InvokeBindingResponse, InvokeResponse, InvokeServiceRequest,
};
use std::sync::Arc;
use tonic::Status;

/// The collaborator serving delegated operations. Requests are forwarded
/// verbatim; the runtime adds nothing and inspects nothing.
#[async_trait::async_trait]
pub trait Delegate: Send + Sync + 'static {
    async fn invoke_service(&self, req: InvokeServiceRequest) -> Result<InvokeResponse, Status>;

    async fn invoke_binding(
        &self,
        req: InvokeBindingRequest,
    ) -> Result<InvokeBindingResponse, Status>;

    async fn get_secret(&self, req: GetSecretRequest) -> Result<GetSecretResponse, Status>;

    async fn get_bulk_secret(
        &self,
        req: GetBulkSecretRequest,
    ) -> Result<GetBulkSecretResponse, Status>;
}

impl Outrigger {
    fn delegate(&self) -> Result<&Arc<dyn Delegate>, Status> {
        self.inner.delegate.as_ref().ok_or_else(|| {
            Status::failed_precondition("no delegated-operations server is configured")
        })
    }

    pub async fn invoke_service(
        &self,
        req: InvokeServiceRequest,
    ) -> Result<InvokeResponse, Status> {
        self.delegate()?.invoke_service(req).await
    }

    pub async fn invoke_binding(
        &self,
        req: InvokeBindingRequest,
    ) -> Result<InvokeBindingResponse, Status> {
        self.delegate()?.invoke_binding(req).await
    }

    pub async fn get_secret(&self, req: GetSecretRequest) -> Result<GetSecretResponse, Status> {
        self.delegate()?.get_secret(req).await
    }

    pub async fn get_bulk_secret(
        &self,
        req: GetBulkSecretRequest,
    ) -> Result<GetBulkSecretResponse, Status> {
        self.delegate()?.get_bulk_secret(req).await
    }
}
