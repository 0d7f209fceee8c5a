use super::{server_error, with_repository};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use tera::Context;

/// `GET /`: every stored cafe as an HTML table. An empty store still renders
/// the page, with a pointer to the submission form.
pub(super) async fn process(state: web::Data<AppState>) -> HttpResponse {
    match with_repository(&state, |repository| repository.list_all()).await {
        Ok(cafes) => {
            let mut context = Context::new();
            context.insert("cafes", &cafes);
            state.pages.respond(HttpResponse::Ok(), "index.html", &context)
        }
        Err(e) => server_error(&state, &e),
    }
}
