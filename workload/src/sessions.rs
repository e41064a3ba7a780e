//! Session factories: build one payload per arrival instant
//!
//! Generators never look inside a payload; they only ask a [`SessionFactory`]
//! for one value per arrival and file it under its instant.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use session_workload_core_rs::{IdAllocator, SessionFactory, WebSessionFactory};
//!
//! let ids = Arc::new(IdAllocator::with_defaults());
//! let mut factory = WebSessionFactory::new("checkout", ids);
//! let session = factory.create_at(12.5).unwrap();
//! assert_eq!(session.id(), 1);
//! assert_eq!(session.start_time(), 12.5);
//! ```

use crate::error::WorkloadError;
use crate::ids::{IdAllocator, SESSION};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Produces the payload for a single arrival
pub trait SessionFactory {
    type Payload;

    /// Create the payload for an arrival at instant `t`
    ///
    /// Within one window the generator calls this with non-decreasing `t`.
    fn create_at(&mut self, t: f64) -> Result<Self::Payload, WorkloadError>;
}

/// Any `FnMut(f64) -> Result<P, WorkloadError>` closure is a factory
impl<P, F> SessionFactory for F
where
    F: FnMut(f64) -> Result<P, WorkloadError>,
{
    type Payload = P;

    fn create_at(&mut self, t: f64) -> Result<P, WorkloadError> {
        self(t)
    }
}

/// Pin a closure's signature so it reads as a [`SessionFactory`]
///
/// Closures already are factories; this only helps type inference when the
/// closure is passed straight to a generic constructor.
///
/// ```
/// use session_workload_core_rs::sessions::{from_fn, SessionFactory};
///
/// let mut factory = from_fn(|t| Ok(format!("session@{}", t)));
/// assert_eq!(factory.create_at(1.5).unwrap(), "session@1.5");
/// ```
pub fn from_fn<P, F>(create: F) -> F
where
    F: FnMut(f64) -> Result<P, WorkloadError>,
{
    create
}

/// A user session against a web application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSession {
    /// Id drawn from the `session` category
    id: i64,

    /// Workload class this session belongs to (e.g. "browse", "checkout")
    kind: String,

    /// Simulation time at which the session starts
    start_time: f64,

    /// Application server VM serving this session, once assigned
    app_server_vm: Option<i64>,

    /// Database server VM behind the application server, once assigned
    db_server_vm: Option<i64>,
}

impl WebSession {
    pub fn new(id: i64, kind: impl Into<String>, start_time: f64) -> Self {
        Self {
            id,
            kind: kind.into(),
            start_time,
            app_server_vm: None,
            db_server_vm: None,
        }
    }

    /// Same session, pinned to an application and a database server VM
    pub fn with_servers(mut self, app_server_vm: i64, db_server_vm: i64) -> Self {
        self.assign_servers(app_server_vm, db_server_vm);
        self
    }

    /// Pin the session to its servers, e.g. after load balancing
    pub fn assign_servers(&mut self, app_server_vm: i64, db_server_vm: i64) {
        self.app_server_vm = Some(app_server_vm);
        self.db_server_vm = Some(db_server_vm);
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn app_server_vm(&self) -> Option<i64> {
        self.app_server_vm
    }

    pub fn db_server_vm(&self) -> Option<i64> {
        self.db_server_vm
    }
}

/// Creates [`WebSession`]s of one kind, minting ids from a shared allocator
///
/// Ids are drawn from the `session/<kind>` category, which falls back to the
/// `session` counter unless the kind is registered on its own. Sessions are
/// left unassigned unless the factory was given servers with
/// [`WebSessionFactory::with_servers`].
#[derive(Debug, Clone)]
pub struct WebSessionFactory {
    kind: String,
    category: String,
    ids: Arc<IdAllocator>,
    servers: Option<(i64, i64)>,
}

impl WebSessionFactory {
    pub fn new(kind: impl Into<String>, ids: Arc<IdAllocator>) -> Self {
        let kind = kind.into();
        let category = format!("{}/{}", SESSION, kind);
        Self {
            kind,
            category,
            ids,
            servers: None,
        }
    }

    /// Pin every session this factory creates to the given server VMs
    pub fn with_servers(mut self, app_server_vm: i64, db_server_vm: i64) -> Self {
        self.servers = Some((app_server_vm, db_server_vm));
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// `(app_server_vm, db_server_vm)` given to new sessions, if any
    pub fn servers(&self) -> Option<(i64, i64)> {
        self.servers
    }
}

impl SessionFactory for WebSessionFactory {
    type Payload = WebSession;

    fn create_at(&mut self, t: f64) -> Result<WebSession, WorkloadError> {
        if !t.is_finite() {
            return Err(WorkloadError::Factory(format!(
                "session start time must be finite, got {}",
                t
            )));
        }

        let id = self.ids.poll_id(&self.category);
        let session = WebSession::new(id, self.kind.clone(), t);
        Ok(match self.servers {
            Some((app, db)) => session.with_servers(app, db),
            None => session,
        })
    }
}
