//! In-process employee store.

use intake_common::{EmployeeRecord, NewEmployee};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Inner {
    next_id: u64,
    employees: BTreeMap<u64, EmployeeRecord>,
}

/// Employee store kept in process memory
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                employees: BTreeMap::new(),
            }),
        }
    }

    pub async fn create(&self, employee: NewEmployee) -> EmployeeRecord {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let record = EmployeeRecord::from_new(id, employee);
        inner.employees.insert(id, record.clone());
        record
    }

    pub async fn find_all(&self) -> Vec<EmployeeRecord> {
        self.inner.read().await.employees.values().cloned().collect()
    }

    pub async fn find_by_id(&self, id: u64) -> Option<EmployeeRecord> {
        self.inner.read().await.employees.get(&id).cloned()
    }

    pub async fn delete_by_id(&self, id: u64) -> bool {
        self.inner.write().await.employees.remove(&id).is_some()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn employee(name: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.create(employee("Jane")).await;
        let b = store.create(employee("John")).await;

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.name, "Jane");
        assert_eq!(a.last_name, "Doe");
    }

    #[tokio::test]
    async fn test_find_and_delete() {
        let store = MemoryStore::new();
        let created = store.create(employee("Jane")).await;

        assert_eq!(store.find_by_id(created.id).await, Some(created.clone()));
        assert_eq!(store.find_by_id(99).await, None);

        assert!(store.delete_by_id(created.id).await);
        assert!(!store.delete_by_id(created.id).await);
        assert!(store.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create(employee("Jane")).await;
        store.delete_by_id(first.id).await;

        let second = store.create(employee("John")).await;
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let store = MemoryStore::new();
        for name in ["C", "A", "B"] {
            store.create(employee(name)).await;
        }

        let ids: Vec<u64> = store.find_all().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
