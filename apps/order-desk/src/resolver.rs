//! Customer resolution.
//!
//! Given a free-text name, decide which of three states the UI should
//! render: order history, an empty-state message, or a registration
//! prompt. Pure reads; nothing here writes.

use rusqlite::Row;
use tracing::debug;

use crate::error::StorageError;
use crate::models::{Customer, OrderDetail};
use crate::store::Store;

/// Outcome of looking up a customer name.
///
/// This value is the workflow context handed from the lookup step to the
/// recording step: `Found`/`FoundNoOrders` carry the resolved customer
/// whose id an order submission should reference, `NotFound` routes the
/// UI to registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The customer exists and has at least one order.
    Found {
        /// The resolved customer (lowest id on a name collision).
        customer: Customer,
        /// Order history, most recent first.
        orders: Vec<OrderDetail>,
    },
    /// The customer exists but has never ordered.
    FoundNoOrders {
        /// The resolved customer.
        customer: Customer,
    },
    /// No customer row matches the name.
    NotFound,
}

impl Resolution {
    /// The resolved customer, if the name matched one.
    #[must_use]
    pub fn customer(&self) -> Option<&Customer> {
        match self {
            Self::Found { customer, .. } | Self::FoundNoOrders { customer } => Some(customer),
            Self::NotFound => None,
        }
    }
}

/// Resolve `name` against the customer table.
///
/// Matching is exact and case-sensitive. Names are not unique; on a
/// collision the lowest-id row wins, deterministically. A blank name
/// resolves to [`Resolution::NotFound`] without touching the store.
///
/// Order history is sorted by order date descending, ties broken by order
/// id descending, so the most recently recorded order always lists first.
///
/// # Errors
///
/// Returns [`StorageError`] if either read fails.
pub fn resolve(store: &Store, name: &str) -> Result<Resolution, StorageError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(Resolution::NotFound);
    }

    let customer = store.query_one(
        "SELECT custid, name, address, phone FROM Customer \
         WHERE name = ?1 ORDER BY custid ASC LIMIT 1",
        [name],
        map_customer,
    )?;
    let Some(customer) = customer else {
        debug!(name, "customer not registered");
        return Ok(Resolution::NotFound);
    };

    let orders = store.query(
        "SELECT O.orderid, B.bookname, O.saleprice, O.orderdate \
         FROM Orders O JOIN Book B ON O.bookid = B.bookid \
         WHERE O.custid = ?1 \
         ORDER BY O.orderdate DESC, O.orderid DESC",
        [customer.id],
        map_order_detail,
    )?;

    debug!(custid = customer.id, orders = orders.len(), "customer resolved");
    if orders.is_empty() {
        Ok(Resolution::FoundNoOrders { customer })
    } else {
        Ok(Resolution::Found { customer, orders })
    }
}

/// List every registered customer, ordered by id.
///
/// # Errors
///
/// Returns [`StorageError`] if the read fails.
pub fn list_customers(store: &Store) -> Result<Vec<Customer>, StorageError> {
    store.query(
        "SELECT custid, name, address, phone FROM Customer ORDER BY custid",
        [],
        map_customer,
    )
}

fn map_customer(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
    })
}

fn map_order_detail(row: &Row<'_>) -> rusqlite::Result<OrderDetail> {
    Ok(OrderDetail {
        order_id: row.get(0)?,
        book_name: row.get(1)?,
        sale_price: row.get(2)?,
        order_date: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::params;

    use super::*;
    use crate::store::schema;

    fn test_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        schema::ensure_schema(&store).unwrap();
        schema::seed_books(&store).unwrap();
        store
    }

    fn insert_customer(store: &Store, id: i64, name: &str) {
        store
            .execute(
                "INSERT INTO Customer (custid, name, address, phone) VALUES (?1, ?2, '', '')",
                params![id, name],
            )
            .unwrap();
    }

    fn insert_order(store: &Store, id: i64, custid: i64, bookid: i64, date: &str) {
        store
            .execute(
                "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) \
                 VALUES (?1, ?2, ?3, 10000, ?4)",
                params![id, custid, bookid, date],
            )
            .unwrap();
    }

    #[test]
    fn unregistered_name_is_not_found() {
        let store = test_store();
        assert_eq!(resolve(&store, "nobody").unwrap(), Resolution::NotFound);
    }

    #[test]
    fn blank_name_is_not_found_without_a_lookup() {
        let store = test_store();
        assert_eq!(resolve(&store, "   ").unwrap(), Resolution::NotFound);
        assert_eq!(resolve(&store, "").unwrap(), Resolution::NotFound);
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let store = test_store();
        insert_customer(&store, 1, "Kim");
        assert_eq!(resolve(&store, "kim").unwrap(), Resolution::NotFound);
        assert_eq!(resolve(&store, "Ki").unwrap(), Resolution::NotFound);
        assert!(matches!(
            resolve(&store, "Kim").unwrap(),
            Resolution::FoundNoOrders { .. }
        ));
    }

    #[test]
    fn registered_customer_without_orders_is_found_no_orders() {
        let store = test_store();
        insert_customer(&store, 1, "Kim");

        let resolution = resolve(&store, "Kim").unwrap();
        let Resolution::FoundNoOrders { customer } = resolution else {
            panic!("expected FoundNoOrders, got {resolution:?}");
        };
        assert_eq!(customer.id, 1);
        assert_eq!(customer.name, "Kim");
    }

    #[test]
    fn history_is_sorted_most_recent_first() {
        let store = test_store();
        insert_customer(&store, 1, "Kim");
        insert_order(&store, 1, 1, 1, "2024-01-05");
        insert_order(&store, 2, 1, 2, "2024-03-01");
        insert_order(&store, 3, 1, 3, "2024-02-10");

        let Resolution::Found { orders, .. } = resolve(&store, "Kim").unwrap() else {
            panic!("expected Found");
        };
        let ids: Vec<i64> = orders.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        // A later-dated order placed afterwards moves to the front.
        insert_order(&store, 4, 1, 1, "2024-12-31");
        let Resolution::Found { orders, .. } = resolve(&store, "Kim").unwrap() else {
            panic!("expected Found");
        };
        assert_eq!(orders[0].order_id, 4);
    }

    #[test]
    fn same_date_orders_list_newest_insert_first() {
        let store = test_store();
        insert_customer(&store, 1, "Kim");
        insert_order(&store, 1, 1, 1, "2024-01-01");
        insert_order(&store, 2, 1, 2, "2024-01-01");

        let Resolution::Found { orders, .. } = resolve(&store, "Kim").unwrap() else {
            panic!("expected Found");
        };
        assert_eq!(orders[0].order_id, 2);
    }

    #[test]
    fn duplicate_names_resolve_to_the_lowest_id() {
        let store = test_store();
        insert_customer(&store, 5, "Kim");
        insert_customer(&store, 2, "Kim");
        insert_order(&store, 1, 5, 1, "2024-01-01");

        // custid 2 wins even though custid 5 has the order history
        let resolution = resolve(&store, "Kim").unwrap();
        let Resolution::FoundNoOrders { customer } = resolution else {
            panic!("expected FoundNoOrders, got {resolution:?}");
        };
        assert_eq!(customer.id, 2);
    }

    #[test]
    fn history_only_includes_the_resolved_customer() {
        let store = test_store();
        insert_customer(&store, 1, "Kim");
        insert_customer(&store, 2, "Park");
        insert_order(&store, 1, 1, 1, "2024-01-01");
        insert_order(&store, 2, 2, 2, "2024-01-02");

        let Resolution::Found { orders, .. } = resolve(&store, "Kim").unwrap() else {
            panic!("expected Found");
        };
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, 1);
    }

    #[test]
    fn list_customers_orders_by_id() {
        let store = test_store();
        insert_customer(&store, 3, "Choi");
        insert_customer(&store, 1, "Kim");

        let all = list_customers(&store).unwrap();
        let ids: Vec<i64> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
