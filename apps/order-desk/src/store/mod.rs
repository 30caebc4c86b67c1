//! Persistence gateway over the embedded SQLite store.
//!
//! [`Store`] owns the single connection to the Madang dataset. It is an
//! explicitly constructed handle (opened once at startup, passed to each
//! component, dropped on shutdown), never a process global. Every statement
//! that touches user input is parameterized; nothing here interpolates text
//! into SQL.
//!
//! Reads go through [`Store::query`] / [`Store::query_one`]. Single writes
//! go through [`Store::execute`]. Multi-statement units of work (allocate an
//! id, insert the row that consumes it) go through [`Store::with_write_tx`],
//! which runs the closure under `BEGIN IMMEDIATE` so concurrent sessions on
//! the same file serialize instead of racing.

pub mod schema;

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row, Transaction,
    TransactionBehavior};
use tracing::{debug, info};

use crate::error::StorageError;

/// How long a writer waits for the store's write lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Owned handle to the embedded store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if absent) the store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the file cannot be opened or the
    /// connection pragmas cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| StorageError::Open(e.to_string()))?;

        info!(path = %path.display(), "store opened");
        Self::configure(conn)
    }

    /// Open a private in-memory store (tests, scratch sessions).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if SQLite refuses the connection.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Open(e.to_string()))?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> Result<Self, StorageError> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StorageError::Open(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Run a parameterized read query, mapping each row through `map`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Query`] if the statement is malformed or the
    /// read fails.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>, StorageError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        let collected = rows.collect::<rusqlite::Result<Vec<T>>>()?;
        debug!(rows = collected.len(), "query returned");
        Ok(collected)
    }

    /// Run a parameterized read query expected to match at most one row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Query`] if the statement is malformed or the
    /// read fails.
    pub fn query_one<T, P, F>(
        &self,
        sql: &str,
        params: P,
        map: F,
    ) -> Result<Option<T>, StorageError>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.conn
            .query_row(sql, params, map)
            .optional()
            .map_err(Into::into)
    }

    /// Run a single parameterized write statement.
    ///
    /// Statements that belong to a larger logical operation must go through
    /// [`Store::with_write_tx`] instead so they commit or roll back as one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Execute`] or [`StorageError::Constraint`]
    /// depending on the failure.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize, StorageError> {
        self.conn.execute(sql, params).map_err(|e| match e.into() {
            StorageError::Constraint(msg) => StorageError::Constraint(msg),
            StorageError::Query(msg) => StorageError::Execute(msg),
            other => other,
        })
    }

    /// Run a batch of statements (schema provisioning, seeding).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Execute`] on the first failing statement.
    pub fn execute_batch(&self, sql: &str) -> Result<(), StorageError> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| StorageError::Execute(e.to_string()))
    }

    /// Run `f` inside an immediate (write-locking) transaction.
    ///
    /// Commits if `f` returns `Ok`, rolls back if it returns `Err` or the
    /// commit itself fails. Taking the write lock up front is what makes
    /// "read the max id, then insert" safe across concurrent sessions:
    /// SQLite serializes immediate transactions, and the busy timeout makes
    /// queued writers wait rather than fail.
    ///
    /// # Errors
    ///
    /// Propagates `f`'s error, or a [`StorageError::Transaction`] wrapped
    /// into `E` if the transaction cannot begin or commit.
    pub fn with_write_tx<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        E: From<StorageError>,
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| E::from(StorageError::Transaction(e.to_string())))?;
        let value = f(&tx)?;
        tx.commit()
            .map_err(|e| E::from(StorageError::Transaction(e.to_string())))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::params;

    use super::*;

    fn test_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        schema::ensure_schema(&store).unwrap();
        store
    }

    #[test]
    fn execute_and_query_round_trip() {
        let store = test_store();
        let inserted = store
            .execute(
                "INSERT INTO Customer (custid, name, address, phone) VALUES (?1, ?2, ?3, ?4)",
                params![1, "Park", "Busan", "010-1111-2222"],
            )
            .unwrap();
        assert_eq!(inserted, 1);

        let names = store
            .query("SELECT name FROM Customer", [], |row| row.get::<_, String>(0))
            .unwrap();
        assert_eq!(names, vec!["Park".to_string()]);
    }

    #[test]
    fn query_one_distinguishes_absent_from_error() {
        let store = test_store();
        let row: Option<i64> = store
            .query_one("SELECT custid FROM Customer WHERE name = ?1", ["nobody"], |r| {
                r.get(0)
            })
            .unwrap();
        assert!(row.is_none());

        let err = store
            .query_one("SELECT nope FROM Customer", [], |r| r.get::<_, i64>(0))
            .unwrap_err();
        assert!(matches!(err, StorageError::Query(_)));
    }

    #[test]
    fn failed_transaction_rolls_back_every_statement() {
        let mut store = test_store();
        let result: Result<(), StorageError> = store.with_write_tx(|tx| {
            tx.execute(
                "INSERT INTO Customer (custid, name, address, phone) VALUES (1, 'Kim', '', '')",
                [],
            )?;
            Err(StorageError::Execute("forced failure".to_string()))
        });
        assert!(result.is_err());

        let count: Option<i64> = store
            .query_one("SELECT COUNT(*) FROM Customer", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, Some(0));
    }

    #[test]
    fn committed_transaction_persists() {
        let mut store = test_store();
        store
            .with_write_tx::<_, StorageError, _>(|tx| {
                tx.execute(
                    "INSERT INTO Customer (custid, name, address, phone) VALUES (1, 'Kim', '', '')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let count: Option<i64> = store
            .query_one("SELECT COUNT(*) FROM Customer", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, Some(1));
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let store = test_store();
        let err = store
            .execute(
                "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) \
                 VALUES (1, 99, 99, 1000, '2024-01-01')",
                [],
            )
            .unwrap_err();
        assert!(matches!(err, StorageError::Constraint(_)));
    }
}
