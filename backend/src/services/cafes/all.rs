use super::with_repository;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::responses::CafeList;
use log::error;
use serde_json::json;

/// `GET /all`: `{"cafes": [...]}` with every field of every cafe.
pub(super) async fn process(state: web::Data<AppState>) -> HttpResponse {
    match with_repository(&state, |repository| repository.list_all()).await {
        Ok(cafes) => HttpResponse::Ok().json(CafeList { cafes }),
        Err(e) => {
            error!("Cafe storage failure: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "storage unavailable" }))
        }
    }
}
