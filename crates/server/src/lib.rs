use std::sync::Arc;

use db::DBService;
use tokio_util::sync::CancellationToken;

pub mod config;
pub mod error;
pub mod routes;
pub mod templates;

use templates::TemplateRegistry;

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    templates: Arc<TemplateRegistry>,
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(db: DBService, templates: TemplateRegistry, shutdown: CancellationToken) -> Self {
        Self {
            db,
            templates: Arc::new(templates),
            shutdown,
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Token for one request's queries; cancelled when the server shuts down.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
