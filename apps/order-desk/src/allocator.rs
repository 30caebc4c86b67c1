//! Surrogate identifier allocation.
//!
//! Ids are one greater than the current per-table maximum (1 on an empty
//! table), never reused, strictly increasing. The naive "read max, then
//! insert" sequence is a race when two sessions submit at once, so
//! [`next_id`] only exists as a function of an open [`Transaction`]: the
//! read and the dependent insert always share one immediate transaction,
//! which SQLite serializes across writers.

use rusqlite::Transaction;

use crate::error::StorageError;

/// Tables whose primary keys are allocator-assigned.
///
/// The table and column names come from this enum, never from input, so
/// the statement built in [`next_id`] stays injection-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdTable {
    /// The Customer table (`custid`).
    Customer,
    /// The Orders table (`orderid`).
    Order,
}

impl IdTable {
    const fn table(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Order => "Orders",
        }
    }

    const fn pk_column(self) -> &'static str {
        match self {
            Self::Customer => "custid",
            Self::Order => "orderid",
        }
    }
}

/// Compute the next unused id for `table` inside `tx`.
///
/// The caller must consume the id with an insert in the same transaction;
/// committing nothing wastes no ids (the max is re-read next time), and
/// rolling back simply un-reserves it.
///
/// # Errors
///
/// Returns [`StorageError::Query`] if the read fails.
pub fn next_id(tx: &Transaction<'_>, table: IdTable) -> Result<i64, StorageError> {
    let sql = format!(
        "SELECT COALESCE(MAX({pk}), 0) + 1 FROM {table}",
        pk = table.pk_column(),
        table = table.table(),
    );
    tx.query_row(&sql, [], |row| row.get(0)).map_err(Into::into)
}
