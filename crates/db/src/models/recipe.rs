use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cancel::{Cancelled, cancellable};

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("recipe not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Cancelled(#[from] Cancelled),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub book: String,
    pub page_num: i64,
    /// Note items, each prefixed with `*`. Empty when the recipe has none.
    pub notes: String,
    /// `None` means the recipe has never been made.
    pub last_made: Option<NaiveDate>,
}

/// Row as persisted; `notes` and `last_made` are nullable columns.
#[derive(Debug, FromRow)]
struct RecipeRow {
    id: i64,
    title: String,
    book: String,
    page_num: i64,
    notes: Option<String>,
    last_made: Option<NaiveDate>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            book: row.book,
            page_num: row.page_num,
            notes: row.notes.unwrap_or_default(),
            last_made: row.last_made,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecipe {
    pub title: String,
    pub book: String,
    pub page_num: i64,
    pub notes: String,
    pub last_made: Option<NaiveDate>,
}

impl Recipe {
    /// Insert a new recipe and return the id the database assigned to it.
    pub async fn create(
        pool: &SqlitePool,
        cancel: &CancellationToken,
        data: &CreateRecipe,
    ) -> Result<i64, RecipeError> {
        let query = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO recipes (title, book, page_num, notes, last_made)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(&data.title)
        .bind(&data.book)
        .bind(data.page_num)
        .bind(&data.notes)
        .bind(data.last_made)
        .fetch_one(pool);

        Ok(cancellable(cancel, query).await??)
    }

    /// Replace every mutable field of the row with `recipe.id`.
    /// Updating an id that does not exist is not an error.
    pub async fn update(
        pool: &SqlitePool,
        cancel: &CancellationToken,
        recipe: &Recipe,
    ) -> Result<(), RecipeError> {
        let query = sqlx::query(
            r#"UPDATE recipes
               SET title = $1, book = $2, page_num = $3, notes = $4, last_made = $5
               WHERE id = $6"#,
        )
        .bind(&recipe.title)
        .bind(&recipe.book)
        .bind(recipe.page_num)
        .bind(&recipe.notes)
        .bind(recipe.last_made)
        .bind(recipe.id)
        .execute(pool);

        let result = cancellable(cancel, query).await??;
        if result.rows_affected() == 0 {
            warn!(recipe_id = recipe.id, "Update matched no recipe");
        }
        Ok(())
    }

    pub async fn find_all(
        pool: &SqlitePool,
        cancel: &CancellationToken,
    ) -> Result<Vec<Self>, RecipeError> {
        let query = sqlx::query_as::<_, RecipeRow>(
            r#"SELECT id, title, book, page_num, notes, last_made
               FROM recipes"#,
        )
        .fetch_all(pool);

        let rows = cancellable(cancel, query).await??;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        cancel: &CancellationToken,
        id: i64,
    ) -> Result<Self, RecipeError> {
        let query = sqlx::query_as::<_, RecipeRow>(
            r#"SELECT id, title, book, page_num, notes, last_made
               FROM recipes
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool);

        cancellable(cancel, query)
            .await??
            .map(Recipe::from)
            .ok_or(RecipeError::NotFound)
    }

    /// Pick one recipe uniformly at random using SQLite's `RANDOM()` ordering.
    pub async fn find_random(
        pool: &SqlitePool,
        cancel: &CancellationToken,
    ) -> Result<Self, RecipeError> {
        let query = sqlx::query_as::<_, RecipeRow>(
            r#"SELECT id, title, book, page_num, notes, last_made
               FROM recipes
               ORDER BY RANDOM()
               LIMIT 1"#,
        )
        .fetch_optional(pool);

        cancellable(cancel, query)
            .await??
            .map(Recipe::from)
            .ok_or(RecipeError::NotFound)
    }

    /// Returns the number of rows removed, zero when `id` did not exist.
    pub async fn delete(
        pool: &SqlitePool,
        cancel: &CancellationToken,
        id: i64,
    ) -> Result<u64, RecipeError> {
        let query = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool);

        let result = cancellable(cancel, query).await??;
        Ok(result.rows_affected())
    }

    /// Case-insensitive substring search over `title || book || notes`.
    ///
    /// The fields are concatenated before matching, so a term can match
    /// across the boundary between two fields (the tail of the title plus
    /// the head of the book, for instance). Case folding is Unicode-aware and
    /// the term is matched literally. An empty term matches every row.
    pub async fn search(
        pool: &SqlitePool,
        cancel: &CancellationToken,
        text: &str,
    ) -> Result<Vec<Self>, RecipeError> {
        let needle = text.to_lowercase();
        let recipes = Self::find_all(pool, cancel).await?;
        Ok(recipes
            .into_iter()
            .filter(|recipe| recipe.search_haystack().contains(&needle))
            .collect())
    }

    fn search_haystack(&self) -> String {
        format!("{}{}{}", self.title, self.book, self.notes).to_lowercase()
    }
}
