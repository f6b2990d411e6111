//! Selector ruleset for komiku.id markup.
//!
//! The upstream HTML structure is an opaque, versioned contract; every
//! selector and label the scrapers depend on lives here so a markup
//! change upstream is a one-file edit.

/// A repeated card on listing and search pages.
pub const CARD: &str = ".bge";
pub const CARD_TITLE: &str = "h3";
pub const CARD_LINK: &str = "a";
pub const CARD_IMAGE: &str = "img";
pub const CARD_GENRE: &str = ".tpe1_inf b";
pub const CARD_READERS: &str = ".judul2";
pub const CARD_SUMMARY: &str = "p";
pub const CARD_LATEST_CHAPTER: &str = ".new1:last-child span:last-child";

/// Chapter table on the detail page.
pub const CHAPTER_ROW: &str = "#daftarChapter tr";
pub const ROW_TITLE: &str = ".judulseries a span";
pub const ROW_LINK: &str = ".judulseries a";
pub const ROW_VIEWS: &str = ".pembaca i";
pub const ROW_DATE: &str = ".tanggalseries";

/// Detail-page metadata.
pub const DETAIL_TITLE: &str = "h1";
pub const DETAIL_COVER: &str = "img";
pub const DETAIL_GENRE: &str = "ul.genre li span[itemprop=\"genre\"]";
pub const DETAIL_META_CELL: &str = "td";

/// Reading container on a chapter page.
pub const CHAPTER_IMAGES: &str = "#Baca_Komik img";

/// Metadata fields located by the exact (Indonesian) text of the table
/// cell preceding their value cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    IndonesianTitle,
    Author,
    Status,
    ReaderAge,
    ReadingDirection,
}

pub const DETAIL_LABELS: &[(&str, DetailField)] = &[
    ("Judul Indonesia", DetailField::IndonesianTitle),
    ("Pengarang", DetailField::Author),
    ("Status", DetailField::Status),
    ("Umur Pembaca", DetailField::ReaderAge),
    ("Cara Baca", DetailField::ReadingDirection),
];
