//! Routes for viewing, adding, editing and deleting recipes.

use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use db::models::recipe::{Recipe, RecipeError};
use services::services::{
    recipe_form::{AddRecipeForm, UpdateRecipeForm, parse_id},
    recipe_view::{RecipeResponse, list_response},
};
use tracing::{debug, error, info};

use super::render;
use crate::{
    AppState,
    error::ApiError,
    templates::{Flash, View, names},
};

/// Current local calendar date; time of day is dropped.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /
/// A random recipe, or the empty state when there are none.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let cancel = state.request_token();
    let recipe = match Recipe::find_random(&state.db().pool, &cancel).await {
        Ok(recipe) => Some(RecipeResponse::from(&recipe)),
        Err(RecipeError::NotFound) => {
            debug!("No recipes yet, rendering empty index");
            None
        }
        Err(e) => return Err(e.into()),
    };

    render(&state, names::INDEX, View::Index { recipe })
}

/// GET /recipe/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_id(&id)?;
    let cancel = state.request_token();
    let recipe = Recipe::find_by_id(&state.db().pool, &cancel, id).await?;

    render(
        &state,
        names::RECIPE,
        View::Recipe {
            recipe: RecipeResponse::from(&recipe),
            flash: Flash::None,
        },
    )
}

/// POST /recipe/{id}
/// Edit the last-made date and notes, then show the recipe again with the outcome.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UpdateRecipeForm>,
) -> Result<Html<String>, ApiError> {
    let id = parse_id(&id)?;
    let cancel = state.request_token();
    let mut recipe = Recipe::find_by_id(&state.db().pool, &cancel, id).await?;

    let flash = match form.apply_to(&mut recipe) {
        Err(e) => Flash::error(e.to_string()),
        Ok(()) => match Recipe::update(&state.db().pool, &cancel, &recipe).await {
            Ok(()) => {
                info!(recipe_id = id, "Recipe updated");
                Flash::success("update successful")
            }
            Err(e @ RecipeError::Cancelled(_)) => return Err(e.into()),
            Err(e) => {
                error!(recipe_id = id, error = %e, "Failed to update recipe");
                Flash::error(format!("error: {e}"))
            }
        },
    };

    render(
        &state,
        names::RECIPE,
        View::Recipe {
            recipe: RecipeResponse::from(&recipe),
            flash,
        },
    )
}

/// GET /add/
pub async fn add_recipe_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, names::ADD_RECIPE, View::AddRecipe { flash: Flash::None })
}

/// POST /add/
/// Stays on the add page either way so several recipes can be entered in a row.
pub async fn create_recipe(
    State(state): State<AppState>,
    Form(form): Form<AddRecipeForm>,
) -> Result<Html<String>, ApiError> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(e) => {
            debug!(error = %e, "Rejected new recipe");
            return render(
                &state,
                names::ADD_RECIPE,
                View::AddRecipe {
                    flash: Flash::error(e.to_string()),
                },
            );
        }
    };

    let cancel = state.request_token();
    let id = Recipe::create(&state.db().pool, &cancel, &data).await?;
    info!(recipe_id = id, title = %data.title, "Recipe created");

    render(
        &state,
        names::ADD_RECIPE,
        View::AddRecipe {
            flash: Flash::success("recipe added successfully!"),
        },
    )
}

/// GET /all/
pub async fn all_recipes(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let cancel = state.request_token();
    let recipes = Recipe::find_all(&state.db().pool, &cancel).await?;

    render(
        &state,
        names::ALL,
        View::All {
            recipes: list_response(&recipes),
        },
    )
}

/// POST /made/{id}
pub async fn mark_made(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_id(&id)?;
    let cancel = state.request_token();
    let mut recipe = Recipe::find_by_id(&state.db().pool, &cancel, id).await?;

    recipe.last_made = Some(today());
    Recipe::update(&state.db().pool, &cancel, &recipe).await?;
    info!(recipe_id = id, last_made = ?recipe.last_made, "Recipe marked as made");

    render(
        &state,
        names::RECIPE,
        View::Recipe {
            recipe: RecipeResponse::from(&recipe),
            flash: Flash::success("Marked as made today!"),
        },
    )
}

/// POST /recipe/delete/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = parse_id(&id)?;
    let cancel = state.request_token();
    let removed = Recipe::delete(&state.db().pool, &cancel, id).await?;
    info!(recipe_id = id, removed, "Recipe deleted");

    Ok(Redirect::to("/"))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/recipe/{id}", get(get_recipe).post(update_recipe))
        .route("/recipe/delete/{id}", post(delete_recipe))
        .route("/add/", get(add_recipe_page).post(create_recipe))
        .route("/all/", get(all_recipes))
        .route("/made/{id}", post(mark_made))
}
