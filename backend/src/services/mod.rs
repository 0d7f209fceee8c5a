pub mod assets;
pub mod cafes;

use actix_web::HttpResponse;

/// Fallback for every path no service claims.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().body("Not Found")
}
