//! Presentation models built from stored recipes.
//!
//! Everything here is pure: no I/O, no clock. Absent values coming from the
//! store (`None` dates) become display sentinels only at this boundary.

use chrono::NaiveDate;
use db::models::recipe::Recipe;
use serde::Serialize;

/// Format used for display and for `<input type="date">` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Marker that starts every note item in the stored notes string.
pub const NOTE_DELIMITER: char = '*';

/// Split stored notes into their items.
///
/// Stored notes look like `*first*second`, so the segment before the first
/// delimiter is always dropped. A lone empty item left over (notes of just
/// `*`) means there are no notes.
pub fn tokenize_notes(notes: &str) -> Vec<String> {
    let cleaned = notes.replace('\r', "");
    let mut items: Vec<String> = cleaned
        .split(NOTE_DELIMITER)
        .skip(1)
        .map(str::to_string)
        .collect();

    if items.len() == 1 && items[0].is_empty() {
        items.clear();
    }
    items
}

/// `YYYY-MM-DD`, or an empty string when the recipe was never made.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
}

/// Full view of one recipe, used by the detail and index pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub book: String,
    pub notes: Vec<String>,
    /// Stored form, prefilled into the notes editor.
    pub raw_notes: String,
    pub page_num: i64,
    pub last_made: String,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            book: recipe.book.clone(),
            notes: tokenize_notes(&recipe.notes),
            raw_notes: recipe.notes.clone(),
            page_num: recipe.page_num,
            last_made: format_date(recipe.last_made),
        }
    }
}

/// Row in list views: no notes, no page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRecipe {
    pub id: i64,
    pub title: String,
    pub book: String,
    pub last_made: String,
}

impl From<&Recipe> for ListRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            book: recipe.book.clone(),
            last_made: format_date(recipe.last_made),
        }
    }
}

pub fn list_response(recipes: &[Recipe]) -> Vec<ListRecipe> {
    recipes.iter().map(ListRecipe::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(notes: &str, last_made: Option<NaiveDate>) -> Recipe {
        Recipe {
            id: 3,
            title: "Pad Thai".to_string(),
            book: "Hot Thai Kitchen".to_string(),
            page_num: 101,
            notes: notes.to_string(),
            last_made,
        }
    }

    fn rejoin(items: &[String]) -> String {
        items.iter().map(|item| format!("{NOTE_DELIMITER}{item}")).collect()
    }

    #[test]
    fn test_tokenize_simple_list() {
        assert_eq!(tokenize_notes("*a*b*c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tokenize_empty_and_lone_delimiter() {
        assert!(tokenize_notes("").is_empty());
        assert!(tokenize_notes("*").is_empty());
    }

    #[test]
    fn test_tokenize_strips_carriage_returns() {
        assert_eq!(
            tokenize_notes("*less salt\r\n*double garlic"),
            vec!["less salt\n", "double garlic"]
        );
    }

    #[test]
    fn test_tokenize_drops_text_before_first_delimiter() {
        assert_eq!(tokenize_notes("stray*kept"), vec!["kept"]);
    }

    #[test]
    fn test_tokenize_preserves_order_and_inner_empty_items() {
        assert_eq!(tokenize_notes("*z**a"), vec!["z", "", "a"]);
    }

    #[test]
    fn test_tokenize_rejoin_is_stable() {
        for stored in ["*a*b*c", "*one item", "*x y*  spaced  *z", "", "*"] {
            let first = tokenize_notes(stored);
            let second = tokenize_notes(&rejoin(&first));
            assert_eq!(first, second, "stored notes {stored:?}");
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 3, 1)), "2024-03-01");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_recipe_response_shapes_notes_and_date() {
        let response =
            RecipeResponse::from(&recipe("*toast the rice", NaiveDate::from_ymd_opt(2023, 11, 9)));
        assert_eq!(response.notes, vec!["toast the rice"]);
        assert_eq!(response.raw_notes, "*toast the rice");
        assert_eq!(response.last_made, "2023-11-09");
        assert_eq!(response.page_num, 101);
    }

    #[test]
    fn test_list_projection_keeps_only_summary_fields() {
        let rows = list_response(&[recipe("*secret", None)]);
        assert_eq!(
            rows,
            vec![ListRecipe {
                id: 3,
                title: "Pad Thai".to_string(),
                book: "Hot Thai Kitchen".to_string(),
                last_made: String::new(),
            }]
        );
    }
}
