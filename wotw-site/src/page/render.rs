//! HTML rendering
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All text is escaped except the header announcement, which is stored as
//! markup.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::{PageView, WeedEntry};

const CSS: &str = r#"
body { margin: 0; font-family: Georgia, serif; color: #222; background: #fafaf5; }
.masthead { min-height: 320px; background-size: cover; background-position: center; display: flex; align-items: flex-end; }
.masthead-text { width: 100%; padding: 2rem; background: linear-gradient(transparent, rgba(0,0,0,0.6)); color: #fff; }
.masthead h1 { margin: 0; font-size: 3rem; }
.subtitle { margin: 0.25rem 0 0; font-size: 1.3rem; }
.announcement { max-width: 60rem; margin: 1.5rem auto 0; padding: 1rem 1.5rem; border-left: 6px solid #c8a400; background: #fff8d6; }
main { max-width: 60rem; margin: 0 auto; padding: 1rem; }
.weed { margin: 2rem 0; padding-bottom: 2rem; border-bottom: 1px solid #ccc; }
.weed h2 { margin-bottom: 0; text-transform: capitalize; }
.scientific-name { margin-top: 0.25rem; color: #555; }
.photos { display: flex; flex-wrap: wrap; gap: 1rem; }
.photos figure { margin: 0; flex: 1 1 18rem; }
.photos img, .location-map { width: 100%; border-radius: 4px; }
figcaption { font-size: 0.9rem; color: #555; }
"#;

/// URL for an image path stored in the database
///
/// Relative paths are served from the static directory; absolute URLs and
/// root-relative paths pass through.
pub(crate) fn asset_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/static/{}", path)
    }
}

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Render the full page
pub fn render_page(page: &PageView) -> Markup {
    let header = &page.header;
    let content = html! {
        header class="masthead" style={ "background-image: url('" (asset_url(&header.image_url)) "')" } {
            div class="masthead-text" {
                h1 { (header.title) }
                p class="subtitle" { (header.subtitle) }
            }
        }
        @if let Some(announcement) = &header.announcement {
            section class="announcement" {
                (PreEscaped(announcement))
            }
        }
        main {
            @for entry in &page.weeds {
                (render_weed(entry))
            }
        }
    };

    base_document(&header.title, content)
}

fn render_weed(entry: &WeedEntry) -> Markup {
    let weed = &entry.weed;
    let other_names = entry.other_names();

    html! {
        article class="weed" id={ "weed-" (weed.display_order) } {
            h2 { (entry.primary_name().unwrap_or(&weed.scientific_name)) }
            p class="scientific-name" { em { (weed.scientific_name) } }
            @if !other_names.is_empty() {
                p class="other-names" { "Also known as: " (other_names.join(", ")) }
            }
            @if !entry.photos.is_empty() {
                div class="photos" {
                    @for photo in &entry.photos {
                        figure {
                            img src=(asset_url(&photo.photo_url)) alt=(photo.caption);
                            figcaption { (photo.caption) }
                        }
                    }
                }
            }
            h3 { "Description" }
            p { (weed.description) }
            h3 { "How to remove it" }
            p { (weed.removal_method) }
            h3 { "Comments" }
            p { (weed.comments) }
            h3 { "Where to find it" }
            p { (weed.location_desc) }
            img class="location-map"
                src=(asset_url(&weed.location_map))
                alt={ "Map of " (weed.scientific_name) " locations" };
        }
    }
}

/// Generic error page
///
/// Carries no detail about the failure.
pub fn render_error_page(title: &str, message: &str) -> Markup {
    base_document(
        title,
        html! {
            main {
                h1 { (title) }
                p { (message) }
            }
        },
    )
}
