//! Customer entity and registration draft.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A registered customer.
///
/// Names are not unique in the dataset; only `id` identifies a customer.
/// Rows are created by registration and never mutated or deleted by this
/// workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Surrogate id, allocator-assigned, strictly increasing.
    pub id: i64,
    /// Customer name (exact-match lookup key, not unique).
    pub name: String,
    /// Postal address; may be blank.
    pub address: String,
    /// Phone number; may be blank.
    pub phone: String,
}

/// Input for registering a new customer alongside their first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomerDraft {
    /// Customer name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Phone number.
    pub phone: String,
}

impl NewCustomerDraft {
    /// Check that every field is non-blank.
    ///
    /// Registration through the order desk requires complete contact data,
    /// even though the Customer table itself tolerates blank columns.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteCustomer`] naming the first
    /// blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("address", &self.address),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::IncompleteCustomer { field });
            }
        }
        Ok(())
    }
}

/// The customer side of an order submission.
///
/// Produced from a [`Resolution`](crate::resolver::Resolution): a resolved
/// customer submits as `Existing`, an unregistered name submits as `New`.
/// This is the explicit hand-off between the lookup step and the recording
/// step; there is no shared session state behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerRef {
    /// An already-registered customer, by id.
    Existing(i64),
    /// A customer to register within the same unit of work as the order.
    New(NewCustomerDraft),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewCustomerDraft {
        NewCustomerDraft {
            name: "Kim".to_string(),
            address: "Seoul".to_string(),
            phone: "000-0000-0000".to_string(),
        }
    }

    #[test]
    fn complete_draft_validates() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected_by_name() {
        let mut d = draft();
        d.phone = "   ".to_string();
        assert_eq!(
            d.validate(),
            Err(ValidationError::IncompleteCustomer { field: "phone" })
        );

        let mut d = draft();
        d.name = String::new();
        assert_eq!(
            d.validate(),
            Err(ValidationError::IncompleteCustomer { field: "name" })
        );

        let mut d = draft();
        d.address = "\t".to_string();
        assert_eq!(
            d.validate(),
            Err(ValidationError::IncompleteCustomer { field: "address" })
        );
    }
}
