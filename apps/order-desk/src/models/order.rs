//! Order history and confirmation records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SalePrice;

/// One row of a customer's order history, joined with the book title.
///
/// Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    /// Order id.
    pub order_id: i64,
    /// Title of the ordered book.
    pub book_name: String,
    /// Price the book actually sold for.
    pub sale_price: SalePrice,
    /// Date the order was placed.
    pub order_date: NaiveDate,
}

/// The record re-read from the store after a successful submission.
///
/// Built from the inserted row joined with customer and book names, so it
/// reflects what was actually committed rather than what was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Id allocated to the new order.
    pub order_id: i64,
    /// Name of the ordering customer (possibly just registered).
    pub customer_name: String,
    /// Title of the ordered book.
    pub book_name: String,
    /// Recorded sale price.
    pub sale_price: SalePrice,
    /// Recorded order date.
    pub order_date: NaiveDate,
}
