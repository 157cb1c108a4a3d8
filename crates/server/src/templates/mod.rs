//! Named HTML templates.
//!
//! The registry is assembled once at startup with [`TemplateRegistry::standard`]
//! and shared read-only between requests. Full pages are wrapped in the base
//! layout; partials (the search results fragment) are rendered bare.

mod layout;
mod pages;

use std::collections::HashMap;

use maud::Markup;
use services::services::recipe_view::{ListRecipe, RecipeResponse};
use thiserror::Error;

pub mod names {
    pub const INDEX: &str = "index";
    pub const RECIPE: &str = "recipe";
    pub const ADD_RECIPE: &str = "addRecipe";
    pub const ALL: &str = "all";
    pub const SEARCH: &str = "search";
    pub const SEARCH_RESULTS: &str = "searchResult";
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("template {0:?} is already registered")]
    Duplicate(&'static str),
    #[error("no template named {0:?}")]
    Unknown(String),
    #[error("template {template:?} cannot render a {view} view")]
    ViewMismatch {
        template: &'static str,
        view: &'static str,
    },
}

/// Message shown above the page content after an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Flash {
    #[default]
    None,
    Success(String),
    Error(String),
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

/// Data handed to a template.
#[derive(Debug, Clone)]
pub enum View {
    /// `recipe` is `None` when there are no recipes yet.
    Index { recipe: Option<RecipeResponse> },
    Recipe { recipe: RecipeResponse, flash: Flash },
    AddRecipe { flash: Flash },
    All { recipes: Vec<ListRecipe> },
    Search,
    SearchResults { recipes: Vec<ListRecipe> },
}

impl View {
    pub fn kind(&self) -> &'static str {
        match self {
            View::Index { .. } => "index",
            View::Recipe { .. } => "recipe",
            View::AddRecipe { .. } => "add recipe",
            View::All { .. } => "all recipes",
            View::Search => "search",
            View::SearchResults { .. } => "search results",
        }
    }

    fn flash(&self) -> &Flash {
        static NONE: Flash = Flash::None;
        match self {
            View::Recipe { flash, .. } | View::AddRecipe { flash } => flash,
            _ => &NONE,
        }
    }
}

pub type RenderFn = fn(&View) -> Result<Markup, RenderError>;

#[derive(Clone, Copy)]
struct Template {
    render: RenderFn,
    /// Page title inside the base layout; `None` for partials.
    layout_title: Option<&'static str>,
}

pub struct TemplateRegistry {
    templates: HashMap<&'static str, Template>,
}

#[derive(Default)]
pub struct TemplateRegistryBuilder {
    templates: HashMap<&'static str, Template>,
}

impl TemplateRegistryBuilder {
    /// Register a full page, rendered inside the base layout.
    pub fn page(
        self,
        name: &'static str,
        title: &'static str,
        render: RenderFn,
    ) -> Result<Self, RenderError> {
        self.insert(
            name,
            Template {
                render,
                layout_title: Some(title),
            },
        )
    }

    /// Register a fragment rendered without the base layout.
    pub fn partial(self, name: &'static str, render: RenderFn) -> Result<Self, RenderError> {
        self.insert(
            name,
            Template {
                render,
                layout_title: None,
            },
        )
    }

    fn insert(mut self, name: &'static str, template: Template) -> Result<Self, RenderError> {
        if self.templates.contains_key(name) {
            return Err(RenderError::Duplicate(name));
        }
        self.templates.insert(name, template);
        Ok(self)
    }

    pub fn build(self) -> TemplateRegistry {
        TemplateRegistry {
            templates: self.templates,
        }
    }
}

impl TemplateRegistry {
    pub fn builder() -> TemplateRegistryBuilder {
        TemplateRegistryBuilder::default()
    }

    /// Every template the application serves.
    pub fn standard() -> Result<Self, RenderError> {
        Ok(Self::builder()
            .page(names::INDEX, "Random recipe", pages::index)?
            .page(names::RECIPE, "Recipe", pages::recipe)?
            .page(names::ADD_RECIPE, "Add a recipe", pages::add_recipe)?
            .page(names::ALL, "All recipes", pages::all)?
            .page(names::SEARCH, "Search", pages::search)?
            .partial(names::SEARCH_RESULTS, pages::search_results)?
            .build())
    }

    #[cfg(test)]
    fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn render(&self, name: &str, view: &View) -> Result<String, RenderError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::Unknown(name.to_string()))?;
        let body = (template.render)(view)?;
        let markup = match template.layout_title {
            Some(title) => layout::base(title, view.flash(), body),
            None => body,
        };
        Ok(markup.into_string())
    }
}
