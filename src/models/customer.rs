//! Diesel models for customers and their nested records.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerAddress as DomainCustomerAddress,
    CustomerCode as DomainCustomerCode, CustomerContact as DomainCustomerContact,
    CustomerCredit as DomainCustomerCredit,
};
use crate::domain::types::{CustomerId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub customer_code: String,
    pub customer_name: String,
    pub customer_sales_area: Option<String>,
    pub customer_sales_owner: Option<String>,
    pub customer_service_owner: Option<String>,
    pub customer_price_list: Option<String>,
    pub customer_discount: Option<f64>,
    pub customer_payment_terms: Option<String>,
    pub customer_tax_prefix: Option<String>,
    pub customer_tax_number: Option<String>,
    pub customer_status: bool,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::customer_addresses)]
pub struct CustomerAddress {
    pub id: i32,
    pub customer_id: i32,
    pub address_type: String,
    pub address_street: Option<String>,
    pub address_country: Option<String>,
    pub address_zip: Option<String>,
    pub address_city: Option<String>,
    pub address_district: Option<String>,
    pub address_phone1: Option<String>,
    pub address_phone2: Option<String>,
    pub address_fax: Option<String>,
    pub address_gsm: Option<String>,
    pub address_email: Option<String>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::customer_contacts)]
pub struct CustomerContact {
    pub id: i32,
    pub customer_id: i32,
    pub contact_name: String,
    pub contact_position: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_mobile: Option<String>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::customer_credits)]
pub struct CustomerCredit {
    pub id: i32,
    pub customer_id: i32,
    pub credit_value: f64,
    pub credit_currency: String,
    pub credit_valid_from: Option<NaiveDate>,
    pub credit_valid_to: Option<NaiveDate>,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(customer.id)?,
            code: customer.customer_code,
            name: customer.customer_name,
            sales_area: customer.customer_sales_area,
            sales_owner: customer.customer_sales_owner,
            service_owner: customer.customer_service_owner,
            price_list: customer.customer_price_list,
            discount: customer.customer_discount,
            payment_terms: customer.customer_payment_terms,
            tax_prefix: customer.customer_tax_prefix,
            tax_number: customer.customer_tax_number,
            is_active: customer.customer_status,
            current_address: None,
            addresses: Vec::new(),
            contacts: Vec::new(),
            credits: Vec::new(),
        })
    }
}

impl From<CustomerAddress> for DomainCustomerAddress {
    fn from(address: CustomerAddress) -> Self {
        Self {
            id: address.id,
            address_type: address.address_type,
            street: address.address_street,
            country: address.address_country,
            zip: address.address_zip,
            city: address.address_city,
            district: address.address_district,
            phone1: address.address_phone1,
            phone2: address.address_phone2,
            fax: address.address_fax,
            gsm: address.address_gsm,
            email: address.address_email,
        }
    }
}

impl From<CustomerContact> for DomainCustomerContact {
    fn from(contact: CustomerContact) -> Self {
        Self {
            id: contact.id,
            name: contact.contact_name,
            position: contact.contact_position,
            email: contact.contact_email,
            phone: contact.contact_phone,
            mobile: contact.contact_mobile,
        }
    }
}

impl From<CustomerCredit> for DomainCustomerCredit {
    fn from(credit: CustomerCredit) -> Self {
        Self {
            id: credit.id,
            value: credit.credit_value,
            currency: credit.credit_currency,
            valid_from: credit.credit_valid_from,
            valid_to: credit.credit_valid_to,
        }
    }
}

impl TryFrom<(i32, String)> for DomainCustomerCode {
    type Error = TypeConstraintError;

    fn try_from((id, code): (i32, String)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(id)?,
            code,
        })
    }
}
