//! Database layer for mediport.
//!
//! Provides SQLite connection pooling (via `r2d2`), embedded SQL migrations
//! for the pharmacy/hospital schema, the request-scoped [`DbSession`], and one
//! parameterized query function per search/insert feature.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: a single-file database keeps the whole app
//!   self-contained; WAL allows concurrent readers alongside the occasional
//!   insert, which matches a forms-and-searches access pattern.
//! - **`r2d2` connection pool**: each HTTP request checks one connection out
//!   and returns it at the end of the request; nothing is shared across
//!   requests.
//! - **Embedded migrations**: schema SQL is compiled in via `include_str!`
//!   so the binary can always bring a fresh database up to date.
//! - **Parameterized SQL only**: every statement binds user input through
//!   `?n` placeholders; no query text is ever built from request data.

mod migrations;
mod pool;
pub mod query;
mod session;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use query::{NewPatient, QueryError, ResultSet};
pub use session::{DbSession, SessionError};
