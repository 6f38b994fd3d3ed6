//! The checkout form.

use super::error::CheckoutError;
use crate::model::{NewCustomer, SavedUser};

/// What the customer typed in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDetails {
    pub full_name: String,
    pub contact_phone: String,
    pub delivery_address: String,
    pub email: Option<String>,
    /// Remember these details for the next checkout.
    pub save_info: bool,
}

const MIN_NAME: usize = 2;
const MIN_CONTACT: usize = 5;
const MIN_ADDRESS: usize = 5;

impl CustomerDetails {
    /// Prefills the form from a remembered profile.
    pub fn from_saved(saved: &SavedUser) -> Self {
        Self {
            full_name: saved.full_name.clone(),
            contact_phone: saved.contact_phone.clone(),
            delivery_address: saved.address.clone(),
            email: saved.email.clone(),
            save_info: true,
        }
    }

    /// Field lengths count characters after trimming.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let short = |value: &str, min: usize| value.trim().chars().count() < min;
        if short(&self.full_name, MIN_NAME) {
            return Err(CheckoutError::InvalidDetails("Full name is required".to_string()));
        }
        if short(&self.contact_phone, MIN_CONTACT) {
            return Err(CheckoutError::InvalidDetails(
                "Valid contact number is required".to_string(),
            ));
        }
        if short(&self.delivery_address, MIN_ADDRESS) {
            return Err(CheckoutError::InvalidDetails(
                "Delivery address is required".to_string(),
            ));
        }
        Ok(())
    }

    pub(super) fn to_new_customer(&self) -> NewCustomer {
        NewCustomer {
            full_name: self.full_name.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            address: self.delivery_address.trim().to_string(),
            email: self.email.clone(),
        }
    }
}
