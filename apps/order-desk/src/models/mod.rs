//! Domain models for the Madang order desk.
//!
//! Three persistent entities ([`Customer`], [`Book`], order rows surfaced as
//! [`OrderDetail`]), the validated [`SalePrice`] value object, and the
//! short-lived types that carry a submission through the workflow
//! ([`CustomerRef`], [`NewCustomerDraft`], [`OrderConfirmation`]).

mod book;
mod customer;
mod order;
mod price;

pub use book::Book;
pub use customer::{Customer, CustomerRef, NewCustomerDraft};
pub use order::{OrderConfirmation, OrderDetail};
pub use price::SalePrice;
