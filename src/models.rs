use serde::{Deserialize, Serialize};

/// One card from a listing or search results page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MangaSummary {
    pub title: String,
    pub link: String,
    /// Data URI on success, original URL on inlining failure.
    pub image: String,
    pub genre: String,
    pub readers: String,
    pub summary: String,
    pub latest_chapter: String,
}

/// One row of a title's chapter table, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterEntry {
    pub title: String,
    pub link: String,
    pub views: String,
    pub date: String,
}

/// Metadata parsed from a title's detail page.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MangaDetail {
    pub title: String,
    pub image_url: String,
    pub indonesian_title: String,
    pub genre: Vec<String>,
    pub author: String,
    pub status: String,
    pub reader_age: String,
    pub reading_direction: String,
}

/// Full detail-page payload: metadata plus the chapter table and its
/// first/last entries (`null` when the table is empty).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailPage {
    pub chapters: Vec<ChapterEntry>,
    pub manga: MangaDetail,
    pub first_chapter: Option<ChapterEntry>,
    pub last_chapter: Option<ChapterEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageImage {
    pub src: String,
    pub fallback_src: String,
}

/// A chapter's reading page: every page image inlined, in DOM order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPage {
    pub chapter_number: String,
    pub images: Vec<PageImage>,
    pub chapter_link: String,
    /// Count of image elements in the reading container, including ones
    /// without a src attribute that are dropped from `images`.
    pub total_images: usize,
    pub view_link: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListResponse {
    pub manga_list: Vec<MangaSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<MangaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = MangaSummary {
            title: "Title".to_string(),
            link: "/manga/title/".to_string(),
            image: "data:image/jpeg;base64,aGk=".to_string(),
            genre: "Manga".to_string(),
            readers: "1jt".to_string(),
            summary: "Text".to_string(),
            latest_chapter: "Chapter 10".to_string(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["latestChapter"], json!("Chapter 10"));
        assert_eq!(value.get("latest_chapter"), None);

        let envelope = serde_json::to_value(MangaListResponse {
            manga_list: vec![summary],
        })
        .unwrap();
        assert_eq!(envelope["mangaList"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_detail_page_serializes_null_chapter_bounds() {
        let page = DetailPage {
            chapters: Vec::new(),
            manga: MangaDetail::default(),
            first_chapter: None,
            last_chapter: None,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["firstChapter"], Value::Null);
        assert_eq!(value["lastChapter"], Value::Null);
        assert_eq!(value["chapters"], json!([]));
    }

    #[test]
    fn test_chapter_page_wire_fields() {
        let page = ChapterPage {
            chapter_number: "1050".to_string(),
            images: vec![PageImage {
                src: "data:image/jpeg;base64,aGk=".to_string(),
                fallback_src: "fallback-image-url.png".to_string(),
            }],
            chapter_link: "one-piece-chapter-1050".to_string(),
            total_images: 2,
            view_link: "link-to-view-count".to_string(),
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["chapterNumber"], json!("1050"));
        assert_eq!(value["totalImages"], json!(2));
        assert_eq!(value["images"][0]["fallbackSrc"], json!("fallback-image-url.png"));
    }
}
