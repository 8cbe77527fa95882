//! Employee store.
//!
//! Create/list/find/delete over a configurable backend. Identities are
//! assigned by the backend, start at 1, and are never reused.

mod memory;
mod redis_store;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

use intake_common::{EmployeeRecord, IntakeError, NewEmployee};
use std::sync::Arc;

/// Handle to the configured backend. Cheap to clone.
#[derive(Clone)]
pub enum EmployeeStore {
    Memory(Arc<MemoryStore>),
    Redis(RedisStore),
}

impl EmployeeStore {
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }

    /// Persist a new employee and return it with its identity
    pub async fn create(&self, employee: NewEmployee) -> Result<EmployeeRecord, IntakeError> {
        match self {
            Self::Memory(store) => Ok(store.create(employee).await),
            Self::Redis(store) => store.create(employee).await,
        }
    }

    /// All employees, ordered by id
    pub async fn find_all(&self) -> Result<Vec<EmployeeRecord>, IntakeError> {
        match self {
            Self::Memory(store) => Ok(store.find_all().await),
            Self::Redis(store) => store.find_all().await,
        }
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<EmployeeRecord>, IntakeError> {
        match self {
            Self::Memory(store) => Ok(store.find_by_id(id).await),
            Self::Redis(store) => store.find_by_id(id).await,
        }
    }

    /// Delete an employee. Returns whether it existed.
    pub async fn delete_by_id(&self, id: u64) -> Result<bool, IntakeError> {
        match self {
            Self::Memory(store) => Ok(store.delete_by_id(id).await),
            Self::Redis(store) => store.delete_by_id(id).await,
        }
    }

    /// Is the backend reachable?
    pub async fn ping(&self) -> bool {
        match self {
            Self::Memory(_) => true,
            Self::Redis(store) => store.ping().await,
        }
    }
}
