use tonic::Status;

/// Map a component's semantic error onto the stable wire taxonomy, prefixed
/// with the operation that failed. Etag conflicts abort, invalid etags and
/// absent objects keep their dedicated codes, and everything else is an
/// internal component failure.
pub(crate) fn component_status(context: &str, err: stores::Error) -> Status {
    match &err {
        stores::Error::NotFound(_) => Status::not_found(format!("{context}: {err}")),
        stores::Error::ETagMismatch(_) => Status::aborted(format!("{context}: {err}")),
        stores::Error::ETagInvalid { .. } => {
            Status::invalid_argument(format!("{context}: {err}"))
        }
        stores::Error::Internal(_) => Status::internal(format!("{context}: {err}")),
    }
}
