//! Request-scoped database sessions.
//!
//! A [`DbSession`] owns one pooled connection for the duration of one HTTP
//! request. Handlers receive the session as an explicit argument; there is no
//! ambient per-request state. Release is explicit and idempotent, and a
//! session refuses to hand out its connection after release, so a connection
//! can never be used past the end of its request.

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;

use crate::DbPool;

/// Errors produced by the session lifecycle.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No connection could be checked out of the pool. The request should
    /// fail with a 503-equivalent rather than proceed without a database.
    #[error("database unavailable: {0}")]
    Unavailable(#[from] r2d2::Error),

    /// The session was already released when the connection was requested.
    #[error("database session already released")]
    Released,
}

/// A database connection whose lifetime is exactly one request.
pub struct DbSession {
    conn: Option<PooledConnection<SqliteConnectionManager>>,
}

impl DbSession {
    /// Checks one connection out of the pool for the current request.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unavailable` if the pool cannot supply a
    /// connection within its checkout timeout.
    pub fn acquire(pool: &DbPool) -> Result<Self, SessionError> {
        let conn = pool.get().inspect_err(|e| {
            tracing::error!("failed to acquire request database session: {e}");
        })?;
        Ok(Self { conn: Some(conn) })
    }

    /// Returns the live connection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Released` if [`release`](Self::release) has
    /// already been called.
    pub fn conn(&self) -> Result<&Connection, SessionError> {
        match &self.conn {
            Some(conn) => Ok(conn),
            None => Err(SessionError::Released),
        }
    }

    /// Returns the connection to the pool. Calling this on an
    /// already-released session is a no-op.
    pub fn release(&mut self) {
        if self.conn.take().is_some() {
            tracing::trace!("released request database session");
        }
    }

    /// Whether the session still holds its connection.
    pub fn is_active(&self) -> bool {
        self.conn.is_some()
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations, DbRuntimeSettings};

    fn test_pool(max_size: u32) -> (DbPool, tempfile::TempDir) {
        let settings = DbRuntimeSettings {
            pool_max_size: max_size,
            checkout_timeout_ms: 200,
            ..DbRuntimeSettings::default()
        };
        // A temp file rather than :memory: so every pooled connection sees
        // the same schema.
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("session-test.db");
        let pool = create_pool(path.to_str().expect("utf-8 path"), settings)
            .expect("pool creation should succeed");
        run_migrations(&pool.get().expect("should get connection")).expect("migrations");
        (pool, dir)
    }

    #[test]
    fn acquire_and_query() {
        let (pool, _dir) = test_pool(2);
        let session = DbSession::acquire(&pool).expect("acquire should succeed");

        let one: i64 = session
            .conn()
            .expect("session should be active")
            .query_row("SELECT 1", [], |row| row.get(0))
            .expect("query should succeed");
        assert_eq!(one, 1);
    }

    #[test]
    fn released_session_refuses_use() {
        let (pool, _dir) = test_pool(2);
        let mut session = DbSession::acquire(&pool).expect("acquire should succeed");
        assert!(session.is_active());

        session.release();
        assert!(!session.is_active());

        match session.conn() {
            Err(SessionError::Released) => {}
            other => panic!("expected Released, got {other:?}"),
        }
    }

    #[test]
    fn release_is_idempotent() {
        let (pool, _dir) = test_pool(2);
        let mut session = DbSession::acquire(&pool).expect("acquire should succeed");

        session.release();
        session.release();
        session.release();
        assert!(!session.is_active());
    }

    #[test]
    fn exhausted_pool_is_unavailable() {
        let (pool, _dir) = test_pool(1);
        let _held = DbSession::acquire(&pool).expect("first acquire should succeed");

        match DbSession::acquire(&pool) {
            Err(SessionError::Unavailable(_)) => {}
            Ok(_) => panic!("second acquire should time out with max_size 1"),
            Err(other) => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn sequential_requests_each_get_a_fresh_session() {
        let (pool, _dir) = test_pool(1);

        let mut first = DbSession::acquire(&pool).expect("first acquire should succeed");
        first.release();

        // With the single pooled connection returned, the next "request"
        // can acquire again; the released session itself stays unusable.
        let second = DbSession::acquire(&pool).expect("second acquire should succeed");
        assert!(second.is_active());
        assert!(matches!(first.conn(), Err(SessionError::Released)));
    }
}
