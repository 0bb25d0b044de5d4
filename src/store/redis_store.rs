//! [`StoreClient`] backed by the `redis` crate's synchronous API.

use super::{ScanPage, StoreClient};
use crate::config::{ResolvedConfig, StoreMode};
use crate::model::StoreError;
use redis::cluster::{ClusterClient, ClusterClientBuilder};
use redis::sentinel::{SentinelClient, SentinelNodeConnectionInfo, SentinelServerType};
use redis::{
    Cmd, ConnectionAddr, ConnectionInfo, ConnectionLike, FromRedisValue, RedisConnectionInfo,
    RedisError,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Idle connections kept for reuse; extra ones are closed on return.
const MAX_IDLE_CONNECTIONS: usize = 8;

type PooledConnection = Box<dyn ConnectionLike + Send>;

// =============================================================================
// Connector
// =============================================================================

/// Opens new connections for one of the supported topologies.
enum Connector {
    Standalone(redis::Client),
    // `get_connection` needs `&mut self` to refresh the cached master address.
    Sentinel(Mutex<SentinelClient>),
    Cluster(ClusterClient),
}

impl Connector {
    fn open(&self) -> Result<PooledConnection, RedisError> {
        match self {
            Self::Standalone(client) => Ok(Box::new(client.get_connection()?)),
            Self::Sentinel(client) => {
                let mut client = client.lock().unwrap_or_else(PoisonError::into_inner);
                Ok(Box::new(client.get_connection()?))
            }
            Self::Cluster(client) => Ok(Box::new(client.get_connection()?)),
        }
    }

    fn topology(&self) -> &'static str {
        match self {
            Self::Standalone(_) => "client",
            Self::Sentinel(_) => "sentinel",
            Self::Cluster(_) => "cluster",
        }
    }
}

// =============================================================================
// RedisStore
// =============================================================================

/// Redis-backed store shared by all background tasks.
///
/// Each operation borrows a connection from a small idle pool, opening a new
/// one when the pool is empty, so overlapping tasks never share a connection.
pub struct RedisStore {
    connector: Connector,
    idle: Mutex<Vec<PooledConnection>>,
}

impl RedisStore {
    /// Build a store for the configured topology without connecting yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidAddress` for malformed addresses and
    /// `StoreError::Connect` if the driver rejects the parameters.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, StoreError> {
        let connector = match config.mode {
            StoreMode::Client => {
                if config.addrs.len() > 1 {
                    warn!(
                        addrs = ?config.addrs,
                        "Client mode uses only the first address"
                    );
                }
                let first = config
                    .addrs
                    .first()
                    .ok_or_else(|| StoreError::InvalidAddress(String::new()))?;
                let info = node_info(first, data_node_auth(config))?;
                Connector::Standalone(redis::Client::open(info).map_err(connect_error)?)
            }
            StoreMode::Sentinel => {
                let master = config.master_name.clone().unwrap_or_default();
                let sentinels = config
                    .addrs
                    .iter()
                    .map(|addr| node_info(addr, RedisConnectionInfo::default()))
                    .collect::<Result<Vec<_>, _>>()?;
                let node_info = SentinelNodeConnectionInfo {
                    tls_mode: None,
                    redis_connection_info: Some(data_node_auth(config)),
                };
                let client = SentinelClient::build(
                    sentinels,
                    master,
                    Some(node_info),
                    SentinelServerType::Master,
                )
                .map_err(connect_error)?;
                Connector::Sentinel(Mutex::new(client))
            }
            StoreMode::Cluster => {
                let nodes = config
                    .addrs
                    .iter()
                    .map(|addr| node_info(addr, RedisConnectionInfo::default()))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut builder = ClusterClientBuilder::new(nodes);
                if let Some(username) = &config.username {
                    builder = builder.username(username.clone());
                }
                if let Some(password) = &config.password {
                    builder = builder.password(password.clone());
                }
                Connector::Cluster(builder.build().map_err(connect_error)?)
            }
        };

        Ok(Self {
            connector,
            idle: Mutex::new(Vec::new()),
        })
    }

    /// Round-trip a `PING` to verify the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connect` if no connection can be opened, or
    /// `StoreError::Command` if the store answers with an error.
    pub fn ping(&self) -> Result<(), StoreError> {
        let pong: String = self.query("PING", &redis::cmd("PING"))?;
        debug!(reply = %pong, "Store answered PING");
        Ok(())
    }

    fn checkout(&self) -> Result<PooledConnection, StoreError> {
        let pooled = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        match pooled {
            Some(conn) => Ok(conn),
            None => {
                debug!(topology = self.connector.topology(), "Opening store connection");
                self.connector.open().map_err(connect_error)
            }
        }
    }

    fn checkin(&self, conn: PooledConnection) {
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < MAX_IDLE_CONNECTIONS {
            idle.push(conn);
        }
    }

    fn query<T: FromRedisValue>(&self, op: &'static str, cmd: &Cmd) -> Result<T, StoreError> {
        let mut conn = self.checkout()?;
        match cmd.query::<T>(&mut *conn) {
            Ok(value) => {
                self.checkin(conn);
                Ok(value)
            }
            Err(e) => {
                // Server-side errors (WRONGTYPE, ...) leave the connection usable.
                if !(e.is_io_error() || e.is_connection_dropped() || e.is_timeout()) {
                    self.checkin(conn);
                }
                Err(StoreError::command(op, e))
            }
        }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("RedisStore")
            .field("topology", &self.connector.topology())
            .finish_non_exhaustive()
    }
}

impl StoreClient for RedisStore {
    fn scan_page(
        &self,
        cursor: u64,
        pattern: &str,
        count_hint: usize,
    ) -> Result<ScanPage, StoreError> {
        let (next_cursor, keys): (u64, Vec<String>) = self.query(
            "SCAN",
            redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(count_hint),
        )?;
        Ok(ScanPage { keys, next_cursor })
    }

    fn type_of(&self, key: &str) -> Result<String, StoreError> {
        self.query("TYPE", redis::cmd("TYPE").arg(key))
    }

    fn get_string(&self, key: &str) -> Result<String, StoreError> {
        let value: Option<String> = self.query("GET", redis::cmd("GET").arg(key))?;
        value.ok_or_else(|| StoreError::command("GET", "key no longer exists"))
    }

    fn get_list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.query("LRANGE", redis::cmd("LRANGE").arg(key).arg(0).arg(-1))
    }

    fn get_set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.query("SMEMBERS", redis::cmd("SMEMBERS").arg(key))
    }

    fn get_sorted_set_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.query("ZRANGE", redis::cmd("ZRANGE").arg(key).arg(0).arg(-1))
    }

    fn get_hash_all(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
        self.query("HGETALL", redis::cmd("HGETALL").arg(key))
    }
}

// =============================================================================
// Startup
// =============================================================================

/// Build the store for `config` and verify it answers.
///
/// A failure here is fatal for the program: nothing is retried.
///
/// # Errors
///
/// Propagates address, connection and `PING` failures.
pub fn connect(config: &ResolvedConfig) -> Result<RedisStore, StoreError> {
    let store = RedisStore::from_config(config)?;
    store.ping()?;
    info!(
        topology = store.connector.topology(),
        addrs = ?config.addrs,
        "Connected to store"
    );
    Ok(store)
}

fn connect_error(e: RedisError) -> StoreError {
    StoreError::Connect(e.to_string())
}

/// Credentials and database applied to data nodes (not to sentinels).
fn data_node_auth(config: &ResolvedConfig) -> RedisConnectionInfo {
    RedisConnectionInfo {
        db: config.db,
        username: config.username.clone(),
        password: config.password.clone(),
        ..Default::default()
    }
}

fn node_info(addr: &str, redis: RedisConnectionInfo) -> Result<ConnectionInfo, StoreError> {
    let (host, port) = parse_addr(addr)?;
    Ok(ConnectionInfo {
        addr: ConnectionAddr::Tcp(host, port),
        redis,
    })
}

/// Split `host:port`, accepting bracketed IPv6 hosts (`[::1]:6379`).
fn parse_addr(addr: &str) -> Result<(String, u16), StoreError> {
    let invalid = || StoreError::InvalidAddress(addr.to_string());

    let (host, port) = addr.trim().rsplit_once(':').ok_or_else(invalid)?;
    let port = port.parse::<u16>().map_err(|_| invalid())?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(invalid());
    }

    Ok((host.to_string(), port))
}
