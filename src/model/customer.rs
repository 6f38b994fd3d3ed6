//! Customers as known to the backend, and the profile a customer may ask us to remember.

use crate::model::ids::CustomerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    pub contact_phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Customer payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub contact_phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Customer {
    pub fn from_new(id: CustomerId, new: NewCustomer) -> Self {
        Self {
            id,
            full_name: new.full_name,
            contact_phone: new.contact_phone,
            address: new.address,
            email: new.email,
        }
    }
}

/// Profile stored under `savedUser` so the next checkout form can be prefilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedUser {
    pub full_name: String,
    pub contact_phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&NewCustomer> for SavedUser {
    fn from(c: &NewCustomer) -> Self {
        Self {
            full_name: c.full_name.clone(),
            contact_phone: c.contact_phone.clone(),
            address: c.address.clone(),
            email: c.email.clone(),
        }
    }
}
