//! Serves the embedded stylesheet and any other static asset under `/static`.

use crate::pages::ASSETS_DIR;
use actix_web::web::{get, scope, Path};
use actix_web::{HttpResponse, Scope};
use mime_guess::from_path;

const ASSETS_PATH: &str = "/static";

pub fn configure_routes() -> Scope {
    scope(ASSETS_PATH).route("/{path:.*}", get().to(process))
}

async fn process(path: Path<String>) -> HttpResponse {
    let path = path.into_inner();
    match ASSETS_DIR.get_file(&path) {
        Some(file) => {
            let mime = from_path(&path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}
