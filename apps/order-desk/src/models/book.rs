//! Book entity.

use serde::{Deserialize, Serialize};

/// A book in the catalog.
///
/// Read-only from the workflow's perspective; rows are seeded or managed
/// externally. The list price is the default sale price offered during
/// order entry, not a constraint on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book id.
    pub id: i64,
    /// Title.
    pub name: String,
    /// List price in won.
    pub list_price: i64,
}
