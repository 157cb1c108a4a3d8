use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::Flash;

const STYLE: &str = include_str!("../../static/style.css");
const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

pub(super) fn base(title: &str, flash: &Flash, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Recipe Randomizer" }
                style { (PreEscaped(STYLE)) }
                script src=(HTMX_SRC) {}
            }
            body {
                (site_header())
                main {
                    (flash_banner(flash))
                    (content)
                }
            }
        }
    }
}

fn site_header() -> Markup {
    html! {
        header.site-header {
            a.brand href="/" { "Recipe Randomizer" }
            nav.site-nav {
                a href="/" { "Random" }
                a href="/all/" { "All recipes" }
                a href="/add/" { "Add" }
                a href="/search/" { "Search" }
            }
        }
    }
}

fn flash_banner(flash: &Flash) -> Markup {
    html! {
        @match flash {
            Flash::None => {}
            Flash::Success(message) => { p.flash.flash-success role="status" { (message) } }
            Flash::Error(message) => { p.flash.flash-error role="alert" { (message) } }
        }
    }
}
