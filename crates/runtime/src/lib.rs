//! The Outrigger dispatch core: one object holding an immutable registry per
//! capability kind, dispatching every wire operation onto the component the
//! request names, and mediating between wire shapes and component shapes.
//!
//! Construction is explicit: a host registers components on a [`Builder`] and
//! calls [`Builder::build`]. Registries never change afterwards, which keeps
//! the request hot path lock-free.

use std::sync::Arc;

use proto_outrigger::runtime::{SayHelloRequest, SayHelloResponse};
use stores::config::ConfigStore;
use stores::file::FileStore;
use stores::lock::LockStore;
use stores::pubsub::PubSub;
use stores::sequencer::Sequencer;
use stores::state::{StateStore, TransactionalStateStore};
use tonic::Status;

mod config;
mod delegate;
mod errors;
mod file;
mod lock;
mod pubsub;
mod registry;
mod sequencer;
mod service;
mod state;

pub use delegate::Delegate;
pub use pubsub::CloudEvent;
pub use registry::Registry;

/// The dispatch core. Cheap to clone; all clones share the same registries.
#[derive(Clone)]
pub struct Outrigger {
    inner: Arc<Inner>,
}

struct Inner {
    app_id: String,
    greeting: String,
    config_stores: Registry<dyn ConfigStore>,
    state_stores: Registry<dyn StateStore>,
    transactional_state_stores: Registry<dyn TransactionalStateStore>,
    pubsubs: Registry<dyn PubSub>,
    file_stores: Registry<dyn FileStore>,
    lock_stores: Registry<dyn LockStore>,
    sequencers: Registry<dyn Sequencer>,
    delegate: Option<Arc<dyn Delegate>>,
    sequencer_cache: sequencer::SequencerCache,
    buffers: Arc<file::BufferPool>,
}

impl Outrigger {
    pub fn builder(app_id: impl Into<String>) -> Builder {
        Builder::new(app_id)
    }

    /// The application this sidecar runs beside.
    pub fn app_id(&self) -> &str {
        &self.inner.app_id
    }

    pub async fn say_hello(&self, req: SayHelloRequest) -> Result<SayHelloResponse, Status> {
        let hello = if req.name.is_empty() {
            self.inner.greeting.clone()
        } else {
            format!("{}, {}", self.inner.greeting, req.name)
        };
        Ok(SayHelloResponse { hello })
    }
}

/// The explicit registration step. Components are named here and looked up by
/// that name in every request; names are unique per capability kind.
pub struct Builder {
    app_id: String,
    greeting: String,
    config_stores: Registry<dyn ConfigStore>,
    state_stores: Registry<dyn StateStore>,
    transactional_state_stores: Registry<dyn TransactionalStateStore>,
    pubsubs: Registry<dyn PubSub>,
    file_stores: Registry<dyn FileStore>,
    lock_stores: Registry<dyn LockStore>,
    sequencers: Registry<dyn Sequencer>,
    delegate: Option<Arc<dyn Delegate>>,
}

impl Builder {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            greeting: "hello".to_string(),
            config_stores: Registry::new("configuration"),
            state_stores: Registry::new("state"),
            transactional_state_stores: Registry::new("transactional state"),
            pubsubs: Registry::new("pubsub"),
            file_stores: Registry::new("file"),
            lock_stores: Registry::new("lock"),
            sequencers: Registry::new("sequencer"),
            delegate: None,
        }
    }

    /// Greeting returned by SayHello.
    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn config_store(mut self, name: impl Into<String>, store: Arc<dyn ConfigStore>) -> Self {
        self.config_stores.insert(name, store);
        self
    }

    pub fn state_store(mut self, name: impl Into<String>, store: Arc<dyn StateStore>) -> Self {
        self.state_stores.insert(name, store);
        self
    }

    /// Registers under both the state registry and the transactional one: the
    /// capability is probed here, at construction, never by downcasting on
    /// the request path.
    pub fn transactional_state_store<S>(mut self, name: impl Into<String>, store: Arc<S>) -> Self
    where
        S: TransactionalStateStore,
    {
        let name = name.into();
        self.state_stores
            .insert(name.clone(), store.clone() as Arc<dyn StateStore>);
        self.transactional_state_stores.insert(name, store);
        self
    }

    pub fn pubsub(mut self, name: impl Into<String>, pubsub: Arc<dyn PubSub>) -> Self {
        self.pubsubs.insert(name, pubsub);
        self
    }

    pub fn file_store(mut self, name: impl Into<String>, store: Arc<dyn FileStore>) -> Self {
        self.file_stores.insert(name, store);
        self
    }

    pub fn lock_store(mut self, name: impl Into<String>, store: Arc<dyn LockStore>) -> Self {
        self.lock_stores.insert(name, store);
        self
    }

    pub fn sequencer(mut self, name: impl Into<String>, sequencer: Arc<dyn Sequencer>) -> Self {
        self.sequencers.insert(name, sequencer);
        self
    }

    /// The collaborator serving delegated operations (service invocation,
    /// bindings, secrets).
    pub fn delegate(mut self, delegate: Arc<dyn Delegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn build(self) -> Outrigger {
        Outrigger {
            inner: Arc::new(Inner {
                app_id: self.app_id,
                greeting: self.greeting,
                config_stores: self.config_stores,
                state_stores: self.state_stores,
                transactional_state_stores: self.transactional_state_stores,
                pubsubs: self.pubsubs,
                file_stores: self.file_stores,
                lock_stores: self.lock_stores,
                sequencers: self.sequencers,
                delegate: self.delegate,
                sequencer_cache: sequencer::SequencerCache::new(),
                buffers: Arc::new(file::BufferPool::new()),
            }),
        }
    }
}
