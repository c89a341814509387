use std::collections::HashMap;
use std::sync::Arc;
use tonic::Status;

/// A name → component mapping for one capability kind, populated before
/// serving and read-only thereafter.
pub struct Registry<S: ?Sized> {
    kind: &'static str,
    stores: HashMap<String, Arc<S>>,
}

impl<S: ?Sized> Registry<S> {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            stores: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, store: Arc<S>) {
        let name = name.into();
        if self.stores.insert(name.clone(), store).is_some() {
            tracing::warn!(kind = self.kind, name = %name, "replaced previously registered store");
        }
    }

    /// Resolve `name`, first checking the capability has any components at
    /// all. An unconfigured capability is a precondition failure; an unknown
    /// name within a configured one is the caller's mistake.
    pub fn get(&self, name: &str) -> Result<&Arc<S>, Status> {
        if self.stores.is_empty() {
            return Err(Status::failed_precondition(format!(
                "no {} stores are configured",
                self.kind
            )));
        }
        self.lookup(name)
    }

    /// Resolve `name` without the empty-registry precondition.
    pub fn lookup(&self, name: &str) -> Result<&Arc<S>, Status> {
        self.stores.get(name).ok_or_else(|| {
            Status::invalid_argument(format!("{} store '{}' is not found", self.kind, name))
        })
    }
}
