//! Single-article scraper
//!
//! Reads title, author, date, category and body text from one article page.
//! Independent of the listing harvest: one URL in, one [`ArticleDetail`] out.

use crate::harvest::fetch_page;
use crate::models::ArticleDetail;
use crate::Result;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

static TITLE: Lazy<Selector> = Lazy::new(|| parse_selector("h2:nth-child(1)"));
static AUTHOR_ICON: Lazy<Selector> = Lazy::new(|| parse_selector(".glyphicon-user"));
static DATE_ICON: Lazy<Selector> = Lazy::new(|| parse_selector(".glyphicon-calendar"));
static CATEGORY_ICON: Lazy<Selector> = Lazy::new(|| parse_selector(".glyphicon-tag"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| parse_selector("p"));

/// Sidebar headings that share the title selector
const TITLE_NOISE: &[&str] = &["Berita Lainnya", "Kalender Pendataan", "Foto Gallery"];

const AUTHOR_LABEL: &str = "Diposkan Oleh :";
const DATE_LABEL: &str = "Tanggal :";
const CATEGORY_LABEL: &str = "Kategori :";

fn parse_selector(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector is valid")
}

/// Fetches and scrapes one article page
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - Absolute URL of the article
///
/// # Returns
///
/// * `Ok(ArticleDetail)` - The scraped fields (missing ones are empty)
/// * `Err(HarvestError)` - The page could not be fetched
pub async fn scrape_article(client: &Client, url: &str) -> Result<ArticleDetail> {
    let body = fetch_page(client, url).await?;
    let detail = extract_article(&body);
    tracing::info!("Scraped article {:?} ({} bytes of content)", detail.title, detail.content.len());
    Ok(detail)
}

/// Extracts article fields from page markup
///
/// Author, date and category are read from the element wrapping their icon,
/// with the leading label ("Diposkan Oleh :", "Tanggal :", "Kategori :")
/// removed. Content is the text of every paragraph on the page.
pub fn extract_article(html: &str) -> ArticleDetail {
    let document = Html::parse_document(html);

    let mut title = document
        .select(&TITLE)
        .flat_map(|element| element.text())
        .collect::<String>();
    for noise in TITLE_NOISE {
        title = title.replace(noise, "");
    }

    let author = strip_label(&icon_parents_text(&document, &AUTHOR_ICON, false), AUTHOR_LABEL);
    let date = strip_label(&icon_parents_text(&document, &DATE_ICON, true), DATE_LABEL);
    let category = strip_label(
        &icon_parents_text(&document, &CATEGORY_ICON, false),
        CATEGORY_LABEL,
    );

    let mut content = String::new();
    for paragraph in document.select(&PARAGRAPH) {
        content.extend(paragraph.text());
        content.push(' ');
    }

    ArticleDetail {
        title: title.trim().to_string(),
        author,
        date,
        content: content.trim().to_string(),
        category,
    }
}

/// Text of the distinct parents of every icon match
///
/// With `first_only`, only the first parent is read (pages repeat the date
/// icon in the sidebar).
fn icon_parents_text(document: &Html, icon: &Selector, first_only: bool) -> String {
    let mut seen = Vec::new();
    let mut text = String::new();

    for parent in document
        .select(icon)
        .filter_map(|element| element.parent().and_then(ElementRef::wrap))
    {
        if seen.contains(&parent.id()) {
            continue;
        }
        seen.push(parent.id());
        text.extend(parent.text());

        if first_only {
            break;
        }
    }

    text.trim().to_string()
}

/// Removes the first occurrence of `label` and trims
fn strip_label(text: &str, label: &str) -> String {
    text.replacen(label, "", 1).trim().to_string()
}
