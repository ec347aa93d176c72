use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::dto::customer::{CustomersQuery, SaveOutcome};
use crate::forms::customer::CustomerForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::customer as customer_service;

/// Validation failures travel in-band as `success: false`; only fatal errors
/// map to non-2xx statuses via [`ServiceError`].
fn save_response(outcome: SaveOutcome) -> HttpResponse {
    match outcome {
        SaveOutcome::Saved(customer) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": customer,
        })),
        SaveOutcome::Rejected(errors) => HttpResponse::Ok().json(json!({
            "success": false,
            "errors": errors,
        })),
    }
}

#[get("/customers")]
pub async fn list_customers(
    params: web::Query<CustomersQuery>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let response = customer_service::list_customers(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/customers")]
pub async fn create_customer(
    form: web::Json<CustomerForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = customer_service::create_customer(repo.get_ref(), form.into_inner())?;
    Ok(save_response(outcome))
}

#[put("/customers/{customer_id}")]
pub async fn update_customer(
    customer_id: web::Path<i32>,
    form: web::Json<CustomerForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = customer_service::update_customer(
        repo.get_ref(),
        customer_id.into_inner(),
        form.into_inner(),
    )?;
    Ok(save_response(outcome))
}

#[delete("/customers/{customer_id}")]
pub async fn delete_customer(
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    customer_service::delete_customer(repo.get_ref(), customer_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/customers/category-report")]
pub async fn category_report(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let report = customer_service::category_report(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(report))
}
