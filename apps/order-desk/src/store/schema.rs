//! Schema provisioning and catalog seeding.
//!
//! The original dataset ships as a one-off seed script; here provisioning
//! is idempotent so the binary can run it on every start and tests can run
//! it against a fresh in-memory store.

use tracing::debug;

use super::Store;
use crate::error::StorageError;

/// The three Madang tables.
///
/// Surrogate keys are plain integer primary keys; values are computed by
/// the allocator, not by SQLite's rowid autoincrement, so the schema stays
/// faithful to the dataset. Orders reference both parents; the store keeps
/// `foreign_keys` on, so a dangling reference fails the insert.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Customer (
    custid  INTEGER PRIMARY KEY,
    name    TEXT NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    phone   TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS Book (
    bookid   INTEGER PRIMARY KEY,
    bookname TEXT NOT NULL,
    price    INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS Orders (
    orderid   INTEGER PRIMARY KEY,
    custid    INTEGER NOT NULL REFERENCES Customer(custid),
    bookid    INTEGER NOT NULL REFERENCES Book(bookid),
    saleprice INTEGER NOT NULL,
    orderdate TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_customer_name ON Customer(name);
CREATE INDEX IF NOT EXISTS idx_orders_custid ON Orders(custid);
";

/// The Madang book catalog.
const BOOK_SEED: &str = "
INSERT OR IGNORE INTO Book (bookid, bookname, price) VALUES
    (1, '축구의 역사', 7000),
    (2, '축구 아는 여자', 13000),
    (3, '축구의 이해', 22000),
    (4, '골프 바이블', 35000),
    (5, '피겨 교본', 8000),
    (6, '역도 단계별기술', 6000),
    (7, '야구의 추억', 20000),
    (8, '야구를 부탁해', 13000),
    (9, '올림픽 이야기', 7500),
    (10, 'Olympic Champions', 13000);
";

/// Create the Customer/Book/Orders tables if they do not exist.
///
/// # Errors
///
/// Returns [`StorageError::Execute`] if any DDL statement fails.
pub fn ensure_schema(store: &Store) -> Result<(), StorageError> {
    store.execute_batch(SCHEMA)?;
    debug!("schema ensured");
    Ok(())
}

/// Seed the book catalog, skipping ids that already exist.
///
/// Customers are never seeded; they enter through registration.
///
/// # Errors
///
/// Returns [`StorageError::Execute`] if the insert fails.
pub fn seed_books(store: &Store) -> Result<(), StorageError> {
    store.execute_batch(BOOK_SEED)?;
    debug!("book catalog seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisioning_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        ensure_schema(&store).unwrap();
        ensure_schema(&store).unwrap();
        seed_books(&store).unwrap();
        seed_books(&store).unwrap();

        let books: Option<i64> = store
            .query_one("SELECT COUNT(*) FROM Book", [], |r| r.get(0))
            .unwrap();
        assert_eq!(books, Some(10));
    }

    #[test]
    fn seed_never_overwrites_existing_rows() {
        let store = Store::open_in_memory().unwrap();
        ensure_schema(&store).unwrap();
        store
            .execute(
                "INSERT INTO Book (bookid, bookname, price) VALUES (1, 'custom title', 1)",
                [],
            )
            .unwrap();
        seed_books(&store).unwrap();

        let name: Option<String> = store
            .query_one("SELECT bookname FROM Book WHERE bookid = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(name.as_deref(), Some("custom title"));
    }
}
