//! Redis-backed employee store.
//!
//! Layout: `employee:next_id` counter, `employee:{id}` JSON records, and the
//! `employee:ids` set for listing.

use anyhow::Context;
use intake_common::constants::redis_keys::{EMPLOYEE_PREFIX, ID_SET, NEXT_ID};
use intake_common::{EmployeeRecord, IntakeError, NewEmployee};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::fmt::Display;

/// Employee store on a Redis connection manager (auto-reconnecting)
#[derive(Clone)]
pub struct RedisStore {
    redis: ConnectionManager,
    /// Prepended to every key; empty in production
    namespace: String,
}

fn store_error(e: impl Display) -> IntakeError {
    IntakeError::Store(e.to_string())
}

/// Decode `MGET` values for ids already in ascending order.
///
/// Ids whose record vanished between `SMEMBERS` and `MGET` are skipped.
fn decode_records(values: Vec<Option<String>>) -> Result<Vec<EmployeeRecord>, IntakeError> {
    values
        .into_iter()
        .flatten()
        .map(|data| serde_json::from_str(&data).map_err(store_error))
        .collect()
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;

        let redis = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        Ok(Self {
            redis,
            namespace: String::new(),
        })
    }

    #[cfg(test)]
    fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.namespace, name)
    }

    fn employee_key(&self, id: u64) -> String {
        format!("{}{}{}", self.namespace, EMPLOYEE_PREFIX, id)
    }

    pub async fn create(&self, employee: NewEmployee) -> Result<EmployeeRecord, IntakeError> {
        let mut conn = self.redis.clone();

        let id: u64 = conn.incr(self.key(NEXT_ID), 1u64).await.map_err(store_error)?;
        let record = EmployeeRecord::from_new(id, employee);
        let data = serde_json::to_string(&record).map_err(|e| IntakeError::Internal(e.to_string()))?;

        let _: () = redis::pipe()
            .atomic()
            .set(self.employee_key(id), &data)
            .ignore()
            .sadd(self.key(ID_SET), id)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;

        tracing::debug!(employee_id = id, "Employee stored in Redis");

        Ok(record)
    }

    pub async fn find_all(&self) -> Result<Vec<EmployeeRecord>, IntakeError> {
        let mut conn = self.redis.clone();

        let mut ids: Vec<u64> = conn.smembers(self.key(ID_SET)).await.map_err(store_error)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        ids.sort_unstable();

        // Explicit MGET: always an array reply, even for a single key
        let keys: Vec<String> = ids.iter().map(|&id| self.employee_key(id)).collect();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;

        decode_records(values)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<EmployeeRecord>, IntakeError> {
        let mut conn = self.redis.clone();
        let data: Option<String> = conn.get(self.employee_key(id)).await.map_err(store_error)?;

        match data {
            Some(d) => Ok(Some(serde_json::from_str(&d).map_err(store_error)?)),
            None => Ok(None),
        }
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<bool, IntakeError> {
        let mut conn = self.redis.clone();

        let (deleted, _): (u32, u32) = redis::pipe()
            .atomic()
            .del(self.employee_key(id))
            .srem(self.key(ID_SET), id)
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;

        Ok(deleted > 0)
    }

    pub async fn ping(&self) -> bool {
        let mut conn = self.redis.clone();
        let result: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        result.is_ok()
    }
}
