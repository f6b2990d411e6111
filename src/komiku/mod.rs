//! Scrapers for komiku.id: listing, search, detail and chapter pages.
//!
//! Each operation fetches one upstream page, extracts records with the
//! selector ruleset in [`selectors`], inlines image references through
//! [`crate::image`], and (for listing/search) populates the shared TTL
//! cache. Parsing is pure and separated from fetching so it can be
//! exercised against HTML fixtures.

pub mod selectors;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::image;
use crate::models::{ChapterEntry, ChapterPage, DetailPage, MangaDetail, MangaSummary, PageImage};
use futures::future::join_all;
use log::error;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use selectors::*;

const FALLBACK_IMAGE: &str = "fallback-image-url.png";
const VIEW_LINK_PLACEHOLDER: &str = "link-to-view-count";

async fn fetch_html(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}

fn select_text(scope: ElementRef, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn select_attr(scope: ElementRef, selector: &Selector, attr: &str) -> String {
    scope
        .select(selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

/// Extract a window of listing/search cards, `start` elements in and at
/// most `limit` long. The window is applied to the card elements before
/// any field extraction so out-of-window cards cost nothing.
///
/// `image` holds the raw src attribute; inlining happens afterwards.
pub fn parse_cards_window(document: &Html, start: usize, limit: usize) -> Vec<MangaSummary> {
    let card = Selector::parse(CARD).unwrap();
    let title = Selector::parse(CARD_TITLE).unwrap();
    let link = Selector::parse(CARD_LINK).unwrap();
    let img = Selector::parse(CARD_IMAGE).unwrap();
    let genre = Selector::parse(CARD_GENRE).unwrap();
    let readers = Selector::parse(CARD_READERS).unwrap();
    let summary = Selector::parse(CARD_SUMMARY).unwrap();
    let latest = Selector::parse(CARD_LATEST_CHAPTER).unwrap();

    document
        .select(&card)
        .skip(start)
        .take(limit)
        .map(|element| MangaSummary {
            title: select_text(element, &title),
            link: select_attr(element, &link, "href"),
            image: select_attr(element, &img, "src"),
            genre: select_text(element, &genre),
            readers: select_text(element, &readers),
            summary: select_text(element, &summary),
            latest_chapter: select_text(element, &latest),
        })
        .collect()
}

/// Extract every card on the page.
pub fn parse_cards(document: &Html) -> Vec<MangaSummary> {
    parse_cards_window(document, 0, usize::MAX)
}

/// Extract the chapter table in document order. Rows without a chapter
/// title (header rows and the like) are skipped.
pub fn parse_chapter_rows(document: &Html) -> Vec<ChapterEntry> {
    let row = Selector::parse(CHAPTER_ROW).unwrap();
    let title = Selector::parse(ROW_TITLE).unwrap();
    let link = Selector::parse(ROW_LINK).unwrap();
    let views = Selector::parse(ROW_VIEWS).unwrap();
    let date = Selector::parse(ROW_DATE).unwrap();

    document
        .select(&row)
        .filter_map(|element| {
            let chapter_title = select_text(element, &title);
            if chapter_title.is_empty() {
                return None;
            }
            Some(ChapterEntry {
                title: chapter_title,
                link: select_attr(element, &link, "href"),
                views: select_text(element, &views),
                date: select_text(element, &date),
            })
        })
        .collect()
}

/// Extract detail-page metadata. Labelled fields are located by the exact
/// text of the cell preceding their value cell, per the `DETAIL_LABELS`
/// ruleset; the first matching label wins. `image_url` holds the raw
/// cover src, not yet inlined.
pub fn parse_detail_meta(document: &Html) -> MangaDetail {
    let title = Selector::parse(DETAIL_TITLE).unwrap();
    let cover = Selector::parse(DETAIL_COVER).unwrap();
    let genre = Selector::parse(DETAIL_GENRE).unwrap();
    let cell = Selector::parse(DETAIL_META_CELL).unwrap();

    let mut detail = MangaDetail {
        title: document
            .select(&title)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
        image_url: document
            .select(&cover)
            .next()
            .and_then(|e| e.value().attr("src"))
            .unwrap_or_default()
            .to_string(),
        genre: document
            .select(&genre)
            .map(|e| e.text().collect::<String>().trim().to_string())
            .collect(),
        ..MangaDetail::default()
    };

    for td in document.select(&cell) {
        let label_text = td.text().collect::<String>();
        let Some(&(_, field)) = DETAIL_LABELS
            .iter()
            .find(|(label, _)| *label == label_text.trim())
        else {
            continue;
        };
        let value = td
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .map(|sibling| sibling.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let slot = match field {
            DetailField::IndonesianTitle => &mut detail.indonesian_title,
            DetailField::Author => &mut detail.author,
            DetailField::Status => &mut detail.status,
            DetailField::ReaderAge => &mut detail.reader_age,
            DetailField::ReadingDirection => &mut detail.reading_direction,
        };
        if slot.is_empty() {
            *slot = value;
        }
    }

    detail
}

/// Extract page-image sources from the reading container in DOM order.
///
/// Returns the non-empty src values plus the total count of image
/// elements, src-less ones included.
pub fn parse_chapter_images(document: &Html) -> (Vec<String>, usize) {
    let img = Selector::parse(CHAPTER_IMAGES).unwrap();
    let mut total = 0;
    let mut sources = Vec::new();
    for element in document.select(&img) {
        total += 1;
        if let Some(src) = element.value().attr("src") {
            if !src.is_empty() {
                sources.push(src.to_string());
            }
        }
    }
    (sources, total)
}

/// Trailing path segment after the last `-`, the site's chapter-number
/// convention. Heuristic, not validated as numeric.
pub fn chapter_number_from_link(chapter_link: &str) -> String {
    chapter_link.rsplit('-').next().unwrap_or_default().to_string()
}

/// First card index of a listing page's window. Saturates so an absurd
/// `page` value yields an empty window instead of overflowing.
fn listing_window_start(page: usize, limit: usize) -> usize {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Inline every card image concurrently, preserving card order.
async fn inline_card_images(
    client: &Client,
    origin: &str,
    cards: Vec<MangaSummary>,
) -> Vec<MangaSummary> {
    join_all(cards.into_iter().map(|mut card| async move {
        card.image = image::to_inline_image(client, origin, &card.image).await;
        card
    }))
    .await
}

/// Fetch one listing page, sliced locally to `config.page_limit` entries.
///
/// The remote listing endpoint is not paginated by this parameter, so the
/// scraper always fetches its first page and slices the parsed cards to
/// the `(page-1)*limit..page*limit` window. Results are cached under
/// `mangaPage:<page>`; an upstream failure is logged and yields an empty
/// list, never an error.
pub async fn get_listing_page(
    client: &Client,
    cache: &TtlCache<Vec<MangaSummary>>,
    config: &Config,
    page: usize,
) -> Vec<MangaSummary> {
    let cache_key = format!("mangaPage:{}", page);
    if let Some(cached) = cache.get(&cache_key) {
        return cached;
    }

    let url = format!("{}/manga/page/1", config.api_origin);
    let html = match fetch_html(client, &url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Error fetching data: {}", e);
            return Vec::new();
        }
    };

    let cards = {
        let document = Html::parse_document(&html);
        let start = listing_window_start(page, config.page_limit);
        parse_cards_window(&document, start, config.page_limit)
    };

    let results = inline_card_images(client, &config.site_origin, cards).await;
    cache.insert(cache_key, results.clone());
    results
}

/// Search the listing for a query string. All result cards are returned
/// (no pagination slice) and each link is prefixed with the site origin.
/// Results are cached under `search:<query>`; the empty query is a valid
/// key. Upstream failure yields an empty list.
pub async fn search_listing(
    client: &Client,
    cache: &TtlCache<Vec<MangaSummary>>,
    config: &Config,
    query: &str,
) -> Vec<MangaSummary> {
    let cache_key = format!("search:{}", query);
    if let Some(cached) = cache.get(&cache_key) {
        return cached;
    }

    let url = match Url::parse_with_params(
        &format!("{}/", config.api_origin),
        &[("post_type", "manga"), ("s", query)],
    ) {
        Ok(url) => url,
        Err(e) => {
            error!("Error building search URL: {}", e);
            return Vec::new();
        }
    };
    let html = match fetch_html(client, url.as_str()).await {
        Ok(html) => html,
        Err(e) => {
            error!("Error fetching search data: {}", e);
            return Vec::new();
        }
    };

    let mut cards = {
        let document = Html::parse_document(&html);
        parse_cards(&document)
    };
    for card in &mut cards {
        card.link = format!("{}{}", config.site_origin, card.link);
    }

    let results = inline_card_images(client, &config.site_origin, cards).await;
    cache.insert(cache_key, results.clone());
    results
}

/// Fetch a title's detail page: metadata, inlined cover and the chapter
/// table with its first/last entries. Never cached; a fetch failure
/// propagates to the caller.
pub async fn get_manga_detail(
    client: &Client,
    config: &Config,
    slug: &str,
) -> Result<DetailPage, ScrapeError> {
    let url = format!("{}/manga/{}/", config.site_origin, slug);
    let html = fetch_html(client, &url).await?;

    let (chapters, mut manga) = {
        let document = Html::parse_document(&html);
        (parse_chapter_rows(&document), parse_detail_meta(&document))
    };

    manga.image_url = image::to_inline_image(client, &config.site_origin, &manga.image_url).await;

    let first_chapter = chapters.first().cloned();
    let last_chapter = chapters.last().cloned();

    Ok(DetailPage {
        chapters,
        manga,
        first_chapter,
        last_chapter,
    })
}

/// Fetch a chapter's reading page and inline every page image.
///
/// All inlining fetches are issued together and joined, with the output
/// sequence in DOM order regardless of completion order. Never cached; a
/// fetch failure propagates to the caller.
pub async fn get_chapter_pages(
    client: &Client,
    config: &Config,
    chapter_link: &str,
) -> Result<ChapterPage, ScrapeError> {
    let url = format!("{}/{}", config.site_origin, chapter_link);
    let html = fetch_html(client, &url).await?;

    let (sources, total_images) = {
        let document = Html::parse_document(&html);
        parse_chapter_images(&document)
    };

    let origin = config.site_origin.as_str();
    let images = join_all(sources.iter().map(|src| async move {
        PageImage {
            src: image::to_inline_image(client, origin, src).await,
            fallback_src: FALLBACK_IMAGE.to_string(),
        }
    }))
    .await;

    Ok(ChapterPage {
        chapter_number: chapter_number_from_link(chapter_link),
        images,
        chapter_link: chapter_link.to_string(),
        total_images,
        view_link: VIEW_LINK_PLACEHOLDER.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_number_from_link() {
        assert_eq!(chapter_number_from_link("one-piece-chapter-1050"), "1050");
        assert_eq!(chapter_number_from_link("oneshot"), "oneshot");
        assert_eq!(chapter_number_from_link(""), "");
    }

    #[test]
    fn test_listing_window_start_saturates_on_huge_pages() {
        assert_eq!(listing_window_start(1, 12), 0);
        assert_eq!(listing_window_start(2, 12), 12);
        assert_eq!(listing_window_start(usize::MAX, 12), usize::MAX);
        assert_eq!(listing_window_start(usize::MAX / 4, 12), usize::MAX);
    }

    #[test]
    fn test_missing_card_elements_yield_empty_strings() {
        let document = Html::parse_document(r#"<div class="bge"><h3>Solo</h3></div>"#);
        let cards = parse_cards(&document);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Solo");
        assert_eq!(cards[0].link, "");
        assert_eq!(cards[0].image, "");
        assert_eq!(cards[0].genre, "");
        assert_eq!(cards[0].latest_chapter, "");
    }
}
