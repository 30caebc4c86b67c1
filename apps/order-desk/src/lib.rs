// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Desk - Madang Bookstore Workflow Core
//!
//! Customer lookup and order recording over the Madang dataset
//! (Customer / Book / Orders). The library is the core; any front end is a
//! collaborator that collects input and renders the results.
//!
//! # Components
//!
//! - [`store`]: persistence gateway; owns the single connection to the
//!   embedded SQLite store, runs parameterized reads and transactional
//!   writes, provisions the schema.
//! - [`resolver`]: resolves a customer name to one of three states:
//!   order history, registered-but-empty, or not registered.
//! - [`allocator`]: computes the next surrogate id for a table, inside the
//!   transaction that consumes it, so concurrent sessions never collide.
//! - [`recorder`]: validates a submission and atomically records the order
//!   (registering the customer first when needed).
//!
//! # Workflow
//!
//! ```text
//! name ──▶ resolver::resolve ──▶ Found / FoundNoOrders / NotFound
//!                                        │
//!                      CustomerRef::Existing(id) or ::New(draft)
//!                                        │
//! form ──▶ recorder::record_order ──▶ OrderConfirmation (or error)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Surrogate identifier allocation.
pub mod allocator;

/// Runtime settings.
pub mod config;

/// Error types.
pub mod error;

/// Domain models.
pub mod models;

/// Order recording.
pub mod recorder;

/// Customer resolution.
pub mod resolver;

/// Persistence gateway.
pub mod store;

/// Tracing setup.
pub mod telemetry;

pub use allocator::{next_id, IdTable};
pub use config::Settings;
pub use error::{StorageError, ValidationError, WorkflowError};
pub use models::{
    Book, Customer, CustomerRef, NewCustomerDraft, OrderConfirmation, OrderDetail, SalePrice,
};
pub use recorder::{list_books, record_order, OrderForm};
pub use resolver::{list_customers, resolve, Resolution};
pub use store::Store;
