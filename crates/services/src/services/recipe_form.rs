//! Parsing and validation of recipe form submissions.

use chrono::NaiveDate;
use db::models::recipe::{CreateRecipe, Recipe};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::recipe_view::DATE_FORMAT;

/// User-correctable input problems. Messages echo the offending input so the
/// form can show it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("bad recipe id: {0}")]
    Id(String),
    #[error("bad page input: {0}")]
    PageNum(String),
    #[error("bad date input: {0}")]
    Date(String),
    #[error("missing {0}")]
    Missing(&'static str),
}

/// Body of `POST /add/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddRecipeForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub book: String,
    #[serde(rename = "pageNum", default)]
    pub page_num: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl AddRecipeForm {
    pub fn validate(self) -> Result<CreateRecipe, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Missing("title"));
        }
        let book = self.book.trim();
        if book.is_empty() {
            return Err(ValidationError::Missing("book"));
        }
        let page_num = parse_page_num(&self.page_num)?;
        let last_made = parse_date(&self.date)?;

        Ok(CreateRecipe {
            title: title.to_string(),
            book: book.to_string(),
            page_num,
            notes: self.notes,
            last_made,
        })
    }
}

/// Body of `POST /recipe/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipeForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl UpdateRecipeForm {
    /// Apply the edit to `recipe`. Nothing is changed if the date is invalid.
    pub fn apply_to(self, recipe: &mut Recipe) -> Result<(), ValidationError> {
        let last_made = parse_date(&self.date)?;
        recipe.last_made = last_made;
        // The textarea tends to pad its contents with newlines and indentation.
        recipe.notes = collapse_whitespace(&self.notes);
        Ok(())
    }
}

/// Body of `POST /search/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: String,
}

/// Numeric inputs are trimmed before parsing, like every other form field.
pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim().parse::<i64>().map_err(|e| {
        debug!(input = raw, error = %e, "Rejected recipe id");
        ValidationError::Id(raw.to_string())
    })
}

pub fn parse_page_num(raw: &str) -> Result<i64, ValidationError> {
    raw.trim().parse::<i64>().map_err(|e| {
        debug!(input = raw, error = %e, "Rejected page number");
        ValidationError::PageNum(raw.to_string())
    })
}

/// An empty field means "never made".
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| {
            debug!(input = raw, error = %e, "Rejected date");
            ValidationError::Date(raw.to_string())
        })
}

/// Replace every run of whitespace with a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
