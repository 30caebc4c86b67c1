//! Order recording.
//!
//! Validates a proposed order and performs "optionally register the
//! customer, then record the order" as a single unit of work. Either both
//! rows commit or neither does: a rejected order never leaves a
//! half-created customer behind, and vice versa.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row, Transaction};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::allocator::{next_id, IdTable};
use crate::error::{StorageError, ValidationError, WorkflowError};
use crate::models::{Book, CustomerRef, OrderConfirmation, SalePrice};
use crate::store::Store;

/// A validated-on-entry order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    /// Who is ordering: a resolved customer id, or a draft to register.
    pub customer: CustomerRef,
    /// The selected book.
    pub book_id: i64,
    /// Agreed sale price; already non-negative by construction.
    pub sale_price: SalePrice,
    /// Date of the order.
    pub order_date: NaiveDate,
}

/// Record an order, registering the customer first when the form carries a
/// draft.
///
/// Validation happens before any write: the draft's fields must be
/// non-blank, and the book (and an existing customer id, if given) must
/// reference real rows. The reference checks run inside the same immediate
/// transaction as the inserts, so what was checked is what the inserts see.
///
/// On success the confirmation is re-read from the inserted row joined
/// with customer and book names.
///
/// # Errors
///
/// [`WorkflowError::Validation`] for bad input (nothing written),
/// [`WorkflowError::Storage`] if the store fails (unit rolled back).
pub fn record_order(
    store: &mut Store,
    form: &OrderForm,
) -> Result<OrderConfirmation, WorkflowError> {
    if let CustomerRef::New(draft) = &form.customer {
        draft.validate()?;
    }

    let confirmation = store.with_write_tx(|tx| {
        if !book_exists(tx, form.book_id)? {
            return Err(ValidationError::UnknownBook {
                book_id: form.book_id,
            }
            .into());
        }

        let customer_id = match &form.customer {
            CustomerRef::Existing(id) => {
                if !customer_exists(tx, *id)? {
                    return Err(ValidationError::UnknownCustomer { customer_id: *id }.into());
                }
                *id
            }
            CustomerRef::New(draft) => {
                let id = next_id(tx, IdTable::Customer)?;
                tx.execute(
                    "INSERT INTO Customer (custid, name, address, phone) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![id, draft.name.trim(), draft.address.trim(), draft.phone.trim()],
                )?;
                info!(custid = id, "customer registered");
                id
            }
        };

        let order_id = next_id(tx, IdTable::Order)?;
        tx.execute(
            "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![order_id, customer_id, form.book_id, form.sale_price, form.order_date],
        )?;

        read_confirmation(tx, order_id)
    })?;

    info!(
        order_id = confirmation.order_id,
        customer = %confirmation.customer_name,
        book = %confirmation.book_name,
        price = %confirmation.sale_price,
        "order recorded"
    );
    Ok(confirmation)
}

/// List the book catalog, ordered by id, for the UI's selection list.
///
/// The list price doubles as the default sale price during order entry.
///
/// # Errors
///
/// Returns [`StorageError`] if the read fails.
pub fn list_books(store: &Store) -> Result<Vec<Book>, StorageError> {
    store.query(
        "SELECT bookid, bookname, price FROM Book ORDER BY bookid",
        [],
        |row| {
            Ok(Book {
                id: row.get(0)?,
                name: row.get(1)?,
                list_price: row.get(2)?,
            })
        },
    )
}

fn book_exists(tx: &Transaction<'_>, book_id: i64) -> Result<bool, WorkflowError> {
    let hit = tx
        .query_row("SELECT 1 FROM Book WHERE bookid = ?1", [book_id], |_| Ok(()))
        .optional()
        .map_err(StorageError::from)?;
    Ok(hit.is_some())
}

fn customer_exists(tx: &Transaction<'_>, customer_id: i64) -> Result<bool, WorkflowError> {
    let hit = tx
        .query_row(
            "SELECT 1 FROM Customer WHERE custid = ?1",
            [customer_id],
            |_| Ok(()),
        )
        .optional()
        .map_err(StorageError::from)?;
    Ok(hit.is_some())
}

fn read_confirmation(
    tx: &Transaction<'_>,
    order_id: i64,
) -> Result<OrderConfirmation, WorkflowError> {
    tx.query_row(
        "SELECT O.orderid, C.name, B.bookname, O.saleprice, O.orderdate \
         FROM Orders O \
         JOIN Customer C ON O.custid = C.custid \
         JOIN Book B ON O.bookid = B.bookid \
         WHERE O.orderid = ?1",
        [order_id],
        map_confirmation,
    )
    .map_err(Into::into)
}

fn map_confirmation(row: &Row<'_>) -> rusqlite::Result<OrderConfirmation> {
    Ok(OrderConfirmation {
        order_id: row.get(0)?,
        customer_name: row.get(1)?,
        book_name: row.get(2)?,
        sale_price: row.get(3)?,
        order_date: row.get(4)?,
    })
}
