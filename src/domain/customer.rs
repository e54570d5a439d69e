use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, SortField};
use crate::pagination::AnchorValue;

/// Address type marking the customer's current (denormalized) address.
pub const CURRENT_ADDRESS_TYPE: &str = "AKTUALNY";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub code: String,
    pub name: String,
    pub sales_area: Option<String>,
    pub sales_owner: Option<String>,
    pub service_owner: Option<String>,
    pub price_list: Option<String>,
    pub discount: Option<f64>,
    pub payment_terms: Option<String>,
    pub tax_prefix: Option<String>,
    pub tax_number: Option<String>,
    pub is_active: bool,
    /// Address of type [`CURRENT_ADDRESS_TYPE`], if one is on file.
    pub current_address: Option<CustomerAddress>,
    /// Full address history. Only populated by the detail lookup.
    pub addresses: Vec<CustomerAddress>,
    /// Only populated by the detail lookup.
    pub contacts: Vec<CustomerContact>,
    /// Only populated by the detail lookup.
    pub credits: Vec<CustomerCredit>,
}

impl Customer {
    /// Value of the column the listing is ordered by, used to anchor cursors.
    pub fn sort_key(&self, field: SortField) -> AnchorValue {
        match field {
            SortField::Id => AnchorValue::Integer(self.id.get()),
            SortField::Code => AnchorValue::Text(self.code.clone()),
            SortField::Name => AnchorValue::Text(self.name.clone()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerAddress {
    pub id: i32,
    pub address_type: String,
    pub street: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub phone1: Option<String>,
    pub phone2: Option<String>,
    pub fax: Option<String>,
    pub gsm: Option<String>,
    pub email: Option<String>,
}

impl CustomerAddress {
    pub fn is_current(&self) -> bool {
        self.address_type == CURRENT_ADDRESS_TYPE
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerContact {
    pub id: i32,
    pub name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
}

/// Credit limit granted to a customer for a validity window.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerCredit {
    pub id: i32,
    pub value: f64,
    pub currency: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

/// Lightweight `{id, code}` pair used by pickers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerCode {
    pub id: CustomerId,
    pub code: String,
}
