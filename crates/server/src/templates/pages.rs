use maud::{Markup, html};
use services::services::recipe_view::{ListRecipe, RecipeResponse};

use super::{RenderError, View, names};

fn mismatch(template: &'static str, view: &View) -> RenderError {
    RenderError::ViewMismatch {
        template,
        view: view.kind(),
    }
}

fn last_made_text(last_made: &str) -> &str {
    if last_made.is_empty() {
        "Never made"
    } else {
        last_made
    }
}

pub(super) fn index(view: &View) -> Result<Markup, RenderError> {
    let View::Index { recipe } = view else {
        return Err(mismatch(names::INDEX, view));
    };
    Ok(html! {
        @match recipe {
            Some(recipe) => {
                h1 { "Tonight, why not…" }
                (recipe_summary(recipe))
                p {
                    a href={ "/recipe/" (recipe.id) } { "Open recipe" }
                    " · "
                    a href="/" { "Pick another" }
                }
            }
            None => {
                h1 { "No recipes yet" }
                p { "Add your first one on the " a href="/add/" { "add page" } "." }
            }
        }
    })
}

fn recipe_summary(recipe: &RecipeResponse) -> Markup {
    html! {
        h2 { (recipe.title) }
        p.recipe-meta {
            (recipe.book) ", page " (recipe.page_num)
            br;
            "Last made: " (last_made_text(&recipe.last_made))
        }
        @if !recipe.notes.is_empty() {
            ul.notes {
                @for note in &recipe.notes {
                    li { (note) }
                }
            }
        }
    }
}

pub(super) fn recipe(view: &View) -> Result<Markup, RenderError> {
    let View::Recipe { recipe, .. } = view else {
        return Err(mismatch(names::RECIPE, view));
    };
    Ok(html! {
        (recipe_summary(recipe))
        form.inline method="post" action={ "/made/" (recipe.id) } {
            button type="submit" { "Made it today" }
        }
        form.inline method="post" action={ "/recipe/delete/" (recipe.id) } {
            button.danger type="submit" { "Delete" }
        }
        h3 { "Edit" }
        form.stacked method="post" action={ "/recipe/" (recipe.id) } {
            label for="date" { "Last made" }
            input id="date" name="date" type="date" value=(recipe.last_made);
            label for="notes" { "Notes (start each item with *)" }
            textarea id="notes" name="notes" rows="6" { (recipe.raw_notes) }
            button type="submit" { "Save" }
        }
    })
}

pub(super) fn add_recipe(view: &View) -> Result<Markup, RenderError> {
    let View::AddRecipe { .. } = view else {
        return Err(mismatch(names::ADD_RECIPE, view));
    };
    Ok(html! {
        h1 { "Add a recipe" }
        form.stacked method="post" action="/add/" {
            label for="title" { "Title" }
            input id="title" name="title" type="text" required;
            label for="book" { "Book" }
            input id="book" name="book" type="text" required;
            label for="pageNum" { "Page" }
            input id="pageNum" name="pageNum" type="number" required;
            label for="date" { "Last made (optional)" }
            input id="date" name="date" type="date";
            label for="notes" { "Notes (start each item with *)" }
            textarea id="notes" name="notes" rows="4" {}
            button type="submit" { "Add recipe" }
        }
    })
}

fn recipe_table(recipes: &[ListRecipe]) -> Markup {
    html! {
        table.recipes {
            thead {
                tr { th { "Title" } th { "Book" } th { "Last made" } }
            }
            tbody {
                @for recipe in recipes {
                    tr {
                        td { a href={ "/recipe/" (recipe.id) } { (recipe.title) } }
                        td { (recipe.book) }
                        td { (last_made_text(&recipe.last_made)) }
                    }
                }
            }
        }
    }
}

pub(super) fn all(view: &View) -> Result<Markup, RenderError> {
    let View::All { recipes } = view else {
        return Err(mismatch(names::ALL, view));
    };
    Ok(html! {
        h1 { "All recipes" }
        @if recipes.is_empty() {
            p { "Nothing here yet. " a href="/add/" { "Add a recipe" } "." }
        } @else {
            (recipe_table(recipes))
        }
    })
}

pub(super) fn search(view: &View) -> Result<Markup, RenderError> {
    let View::Search = view else {
        return Err(mismatch(names::SEARCH, view));
    };
    Ok(html! {
        h1 { "Search" }
        form.stacked method="post" action="/search/" hx-post="/search/" hx-target="#results" {
            label for="search" { "Title, book or notes" }
            input id="search" name="search" type="search" autofocus;
            button type="submit" { "Search" }
        }
        div #results {}
    })
}

pub(super) fn search_results(view: &View) -> Result<Markup, RenderError> {
    let View::SearchResults { recipes } = view else {
        return Err(mismatch(names::SEARCH_RESULTS, view));
    };
    Ok(html! {
        @if recipes.is_empty() {
            p { "No matching recipes." }
        } @else {
            (recipe_table(recipes))
        }
    })
}
