//! Search page and the results fragment it swaps in.

use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::get,
};
use db::models::recipe::Recipe;
use services::services::{recipe_form::SearchForm, recipe_view::list_response};
use tracing::debug;

use super::render;
use crate::{
    AppState,
    error::ApiError,
    templates::{View, names},
};

/// GET /search/
pub async fn search_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, names::SEARCH, View::Search)
}

/// POST /search/
/// Renders only the results fragment, not a full page.
pub async fn search_results(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, ApiError> {
    let cancel = state.request_token();
    let recipes = Recipe::search(&state.db().pool, &cancel, &form.search).await?;
    debug!(term = %form.search, matches = recipes.len(), "Search complete");

    render(
        &state,
        names::SEARCH_RESULTS,
        View::SearchResults {
            recipes: list_response(&recipes),
        },
    )
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/search/", get(search_page).post(search_results))
}

#[cfg(test)]
mod tests {
    use db::models::recipe::CreateRecipe;

    use super::*;
    use crate::routes::test_support;

    async fn add(state: &AppState, title: &str, book: &str) {
        let data = CreateRecipe {
            title: title.to_string(),
            book: book.to_string(),
            page_num: 1,
            notes: String::new(),
            last_made: None,
        };
        Recipe::create(&state.db().pool, &state.request_token(), &data)
            .await
            .expect("create");
    }

    #[tokio::test]
    async fn search_page_is_full_document() {
        let state = test_support::state().await;
        let Html(body) = search_page(State(state)).await.expect("page");
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("name=\"search\""));
    }

    #[tokio::test]
    async fn results_are_a_fragment() {
        let state = test_support::state().await;
        add(&state, "My Title Dish", "Book One").await;
        add(&state, "Other", "Book Two").await;

        let form = SearchForm {
            search: "TITLE".to_string(),
        };
        let Html(body) = search_results(State(state), Form(form)).await.expect("results");
        assert!(!body.contains("<html"));
        assert!(body.contains("My Title Dish"));
        assert!(!body.contains("Other"));
    }

    #[tokio::test]
    async fn empty_search_lists_everything() {
        let state = test_support::state().await;
        add(&state, "Alpha", "Book").await;
        add(&state, "Beta", "Book").await;

        let Html(body) = search_results(State(state), Form(SearchForm::default()))
            .await
            .expect("results");
        assert!(body.contains("Alpha"));
        assert!(body.contains("Beta"));
    }
}
