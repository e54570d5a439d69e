use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::types::PageLimit;
use crate::dto::customers::{ErrorPanel, ErrorResponse};
use crate::forms::customers::CustomersQuery;
use crate::repository::DieselRepository;
use crate::routes::status_for;
use crate::services::customers as customer_service;

#[get("/customers")]
pub async fn show_customers(
    params: web::Query<CustomersQuery>,
    repo: web::Data<DieselRepository>,
    default_limit: web::Data<PageLimit>,
) -> impl Responder {
    let query = params.into_inner();
    let limit = *default_limit.get_ref();

    match customer_service::load_customers_page(repo.get_ref(), query.clone(), limit) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => {
            HttpResponse::build(status_for(&err)).json(ErrorPanel::for_listing(&err, &query))
        }
    }
}

#[get("/customers/more")]
pub async fn more_customers(
    params: web::Query<CustomersQuery>,
    repo: web::Data<DieselRepository>,
    default_limit: web::Data<PageLimit>,
) -> impl Responder {
    let query = params.into_inner();
    let limit = *default_limit.get_ref();

    match customer_service::load_more_customers(repo.get_ref(), query, limit) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => HttpResponse::build(status_for(&err)).json(ErrorResponse::new(format!(
            "Failed to load more customers: {err}"
        ))),
    }
}

#[get("/customers/sales-areas")]
pub async fn sales_areas(repo: web::Data<DieselRepository>) -> impl Responder {
    HttpResponse::Ok().json(customer_service::list_sales_areas(repo.get_ref()))
}

#[get("/customers/codes")]
pub async fn customer_codes(repo: web::Data<DieselRepository>) -> impl Responder {
    match customer_service::list_customer_codes(repo.get_ref()) {
        Ok(codes) => HttpResponse::Ok().json(codes),
        Err(_) => HttpResponse::InternalServerError()
            .json(ErrorResponse::new("Failed to fetch customer codes")),
    }
}

/// Must be registered after the static `/customers/*` routes.
#[get("/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match customer_service::get_customer(repo.get_ref(), &customer_id) {
        Ok(Some(customer)) => HttpResponse::Ok().json(customer),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new("Customer not found")),
        Err(err) if err.is_client_error() => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
        Err(err) => HttpResponse::build(status_for(&err))
            .json(ErrorResponse::new("Failed to fetch customer")),
    }
}
