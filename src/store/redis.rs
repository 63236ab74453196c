//! Redis-backed route store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;

use crate::config::StoreConfig;
use crate::store::{RouteStore, StoreError};

/// Route store backed by a Redis hash.
///
/// The route table is a single hash named by configuration; fields are raw
/// request paths and values are serialized route descriptors. The connection
/// manager reconnects on its own and multiplexes concurrent commands, so the
/// handle is cloned per lookup rather than locked.
pub struct RedisRouteStore {
    manager: ConnectionManager,
    table: String,
}

impl RedisRouteStore {
    /// Connect to the store and verify the connection is live.
    ///
    /// `timeout` bounds both connection establishment and every command sent
    /// over the managed connection.
    pub async fn connect(config: &StoreConfig, timeout: Duration) -> Result<Self, StoreError> {
        let info = redis::ConnectionInfo {
            addr: redis::ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: redis::RedisConnectionInfo {
                password: Some(config.password.clone()),
                ..Default::default()
            },
        };

        let client =
            redis::Client::open(info).map_err(|err| StoreError::Connection(err.to_string()))?;
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(timeout)
            .set_response_timeout(timeout);
        let manager = client
            .get_connection_manager_with_config(manager_config)
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let store = Self {
            manager,
            table: config.route_table.clone(),
        };
        store.ping().await?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            table = %store.table,
            "Route store connected"
        );
        Ok(store)
    }

    /// Round-trip a PING to confirm the connection is usable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;
        if pong != "PONG" {
            return Err(StoreError::Connection(format!(
                "unexpected ping reply: {pong}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RouteStore for RedisRouteStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = conn
            .hget(&self.table, key)
            .await
            .map_err(|err| StoreError::Query(err.to_string()))?;
        Ok(value)
    }
}
