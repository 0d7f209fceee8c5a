use crate::config::AppConfig;
use crate::csrf::CsrfGuard;
use crate::pages::{PageError, Pages};
use crate::repository::CafeRepository;

/// Everything a request handler needs, built once from `AppConfig` at startup
/// and shared with every worker as `web::Data<AppState>`.
pub struct AppState {
    pub repository: CafeRepository,
    pub pages: Pages,
    pub csrf: CsrfGuard,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, PageError> {
        Ok(Self {
            repository: CafeRepository::new(&config.database_path),
            pages: Pages::load()?,
            csrf: CsrfGuard::new(config.secret_key.clone(), config.csrf_enabled),
        })
    }
}
