use axum::{
    Router,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect},
    routing::any,
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    error::ApiError,
    templates::View,
};

pub mod recipes;
pub mod search;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(recipes::router(&state))
        .merge(search::router(&state))
        .route("/add", any(add_trailing_slash))
        .route("/all", any(add_trailing_slash))
        .route("/search", any(add_trailing_slash))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render a registered template into the response body.
fn render(state: &AppState, name: &str, view: View) -> Result<Html<String>, ApiError> {
    Ok(Html(state.templates().render(name, &view)?))
}

/// Section pages live under a trailing slash; send bare paths there.
async fn add_trailing_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "page not found")
}

#[cfg(test)]
pub(crate) mod test_support {
    use db::DBService;
    use tokio_util::sync::CancellationToken;

    use crate::{AppState, templates::TemplateRegistry};

    pub async fn state() -> AppState {
        let db = DBService::in_memory().await.expect("db");
        let templates = TemplateRegistry::standard().expect("templates");
        AppState::new(db, templates, CancellationToken::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_without_conflicts() {
        let _router = router(test_support::state().await);
    }

    #[tokio::test]
    async fn bare_section_path_redirects_to_slash() {
        let response = add_trailing_slash(Uri::from_static("/add"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[axum::http::header::LOCATION], "/add/");
    }

    #[tokio::test]
    async fn trailing_slash_redirect_keeps_query() {
        let response = add_trailing_slash(Uri::from_static("/search?search=dal"))
            .await
            .into_response();
        assert_eq!(response.headers()[axum::http::header::LOCATION], "/search/?search=dal");
    }

    #[tokio::test]
    async fn fallback_is_not_found() {
        let response = not_found().await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
