//! Server-rendered HTML pages and the static assets they link to.
//!
//! Both the Tera templates and the stylesheet are embedded in the binary, so
//! the server runs from any working directory.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, HttpResponseBuilder};
use include_dir::{include_dir, Dir};
use log::error;
use tera::{Context, Tera};
use thiserror::Error;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");
pub static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

#[derive(Debug, Error)]
pub enum PageError {
    #[error("template {0} is not valid UTF-8")]
    Encoding(String),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

pub struct Pages {
    tera: Tera,
}

impl Pages {
    /// Compiles every embedded template. Fails on the first syntax error, so a
    /// broken template stops the server at startup instead of on first use.
    pub fn load() -> Result<Self, PageError> {
        let mut sources = Vec::new();
        for file in TEMPLATES_DIR.files() {
            let name = file.path().to_string_lossy().into_owned();
            let body = file
                .contents_utf8()
                .ok_or_else(|| PageError::Encoding(name.clone()))?;
            sources.push((name, body));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, PageError> {
        Ok(self.tera.render(template, context)?)
    }

    /// Renders `template` into the body of `builder`. A rendering failure is
    /// logged and turned into a bare 500.
    pub fn respond(
        &self,
        mut builder: HttpResponseBuilder,
        template: &str,
        context: &Context,
    ) -> HttpResponse {
        match self.render(template, context) {
            Ok(body) => builder.content_type(ContentType::html()).body(body),
            Err(e) => {
                error!("Failed to render {}: {}", template, e);
                HttpResponse::InternalServerError()
                    .content_type(ContentType::plaintext())
                    .body("Internal Server Error")
            }
        }
    }
}
