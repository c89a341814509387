//! The wire surface: `runtime_server::Runtime` implemented on the dispatch
//! core. Every method is a thin hand-off into the core's typed operations;
//! streaming shapes reuse the engines' channel-backed streams directly.

use crate::Outrigger;
use proto_outrigger::runtime::runtime_server::Runtime;
use proto_outrigger::runtime::*;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};

#[tonic::async_trait]
impl Runtime for Outrigger {
    async fn say_hello(
        &self,
        request: Request<SayHelloRequest>,
    ) -> Result<Response<SayHelloResponse>, Status> {
        Ok(Response::new(self.say_hello(request.into_inner()).await?))
    }

    async fn invoke_service(
        &self,
        request: Request<InvokeServiceRequest>,
    ) -> Result<Response<InvokeResponse>, Status> {
        Ok(Response::new(
            self.invoke_service(request.into_inner()).await?,
        ))
    }

    async fn get_configuration(
        &self,
        request: Request<GetConfigurationRequest>,
    ) -> Result<Response<GetConfigurationResponse>, Status> {
        Ok(Response::new(
            self.get_configuration(request.into_inner()).await?,
        ))
    }

    async fn save_configuration(
        &self,
        request: Request<SaveConfigurationRequest>,
    ) -> Result<Response<SaveConfigurationResponse>, Status> {
        Ok(Response::new(
            self.save_configuration(request.into_inner()).await?,
        ))
    }

    async fn delete_configuration(
        &self,
        request: Request<DeleteConfigurationRequest>,
    ) -> Result<Response<DeleteConfigurationResponse>, Status> {
        Ok(Response::new(
            self.delete_configuration(request.into_inner()).await?,
        ))
    }

    type SubscribeConfigurationStream =
        ReceiverStream<Result<SubscribeConfigurationResponse, Status>>;

    async fn subscribe_configuration(
        &self,
        request: Request<Streaming<SubscribeConfigurationRequest>>,
    ) -> Result<Response<Self::SubscribeConfigurationStream>, Status> {
        Ok(Response::new(
            self.subscribe_configuration(request.into_inner()),
        ))
    }

    async fn publish_event(
        &self,
        request: Request<PublishEventRequest>,
    ) -> Result<Response<PublishEventResponse>, Status> {
        Ok(Response::new(
            self.publish_event(request.into_inner()).await?,
        ))
    }

    async fn get_state(
        &self,
        request: Request<GetStateRequest>,
    ) -> Result<Response<GetStateResponse>, Status> {
        Ok(Response::new(self.get_state(request.into_inner()).await?))
    }

    async fn get_bulk_state(
        &self,
        request: Request<GetBulkStateRequest>,
    ) -> Result<Response<GetBulkStateResponse>, Status> {
        Ok(Response::new(
            self.get_bulk_state(request.into_inner()).await?,
        ))
    }

    async fn save_state(
        &self,
        request: Request<SaveStateRequest>,
    ) -> Result<Response<SaveStateResponse>, Status> {
        Ok(Response::new(self.save_state(request.into_inner()).await?))
    }

    async fn delete_state(
        &self,
        request: Request<DeleteStateRequest>,
    ) -> Result<Response<DeleteStateResponse>, Status> {
        Ok(Response::new(
            self.delete_state(request.into_inner()).await?,
        ))
    }

    async fn delete_bulk_state(
        &self,
        request: Request<DeleteBulkStateRequest>,
    ) -> Result<Response<DeleteBulkStateResponse>, Status> {
        Ok(Response::new(
            self.delete_bulk_state(request.into_inner()).await?,
        ))
    }

    async fn execute_state_transaction(
        &self,
        request: Request<ExecuteStateTransactionRequest>,
    ) -> Result<Response<ExecuteStateTransactionResponse>, Status> {
        Ok(Response::new(
            self.execute_state_transaction(request.into_inner()).await?,
        ))
    }

    type GetFileStream = ReceiverStream<Result<GetFileResponse, Status>>;

    async fn get_file(
        &self,
        request: Request<GetFileRequest>,
    ) -> Result<Response<Self::GetFileStream>, Status> {
        Ok(Response::new(self.get_file(request.into_inner()).await?))
    }

    async fn put_file(
        &self,
        request: Request<Streaming<PutFileRequest>>,
    ) -> Result<Response<PutFileResponse>, Status> {
        Ok(Response::new(self.put_file(request.into_inner()).await?))
    }

    async fn list_file(
        &self,
        request: Request<ListFileRequest>,
    ) -> Result<Response<ListFileResponse>, Status> {
        Ok(Response::new(self.list_file(request.into_inner()).await?))
    }

    async fn del_file(
        &self,
        request: Request<DelFileRequest>,
    ) -> Result<Response<DelFileResponse>, Status> {
        Ok(Response::new(self.del_file(request.into_inner()).await?))
    }

    async fn get_file_meta(
        &self,
        request: Request<GetFileMetaRequest>,
    ) -> Result<Response<GetFileMetaResponse>, Status> {
        Ok(Response::new(
            self.get_file_meta(request.into_inner()).await?,
        ))
    }

    async fn try_lock(
        &self,
        request: Request<TryLockRequest>,
    ) -> Result<Response<TryLockResponse>, Status> {
        Ok(Response::new(self.try_lock(request.into_inner()).await?))
    }

    async fn unlock(
        &self,
        request: Request<UnlockRequest>,
    ) -> Result<Response<UnlockResponse>, Status> {
        Ok(Response::new(self.unlock(request.into_inner()).await?))
    }

    async fn get_next_id(
        &self,
        request: Request<GetNextIdRequest>,
    ) -> Result<Response<GetNextIdResponse>, Status> {
        Ok(Response::new(self.get_next_id(request.into_inner()).await?))
    }

    async fn invoke_binding(
        &self,
        request: Request<InvokeBindingRequest>,
    ) -> Result<Response<InvokeBindingResponse>, Status> {
        Ok(Response::new(
            self.invoke_binding(request.into_inner()).await?,
        ))
    }

    async fn get_secret(
        &self,
        request: Request<GetSecretRequest>,
    ) -> Result<Response<GetSecretResponse>, Status> {
        Ok(Response::new(self.get_secret(request.into_inner()).await?))
    }

    async fn get_bulk_secret(
        &self,
        request: Request<GetBulkSecretRequest>,
    ) -> Result<Response<GetBulkSecretResponse>, Status> {
        Ok(Response::new(
            self.get_bulk_secret(request.into_inner()).await?,
        ))
    }
}
