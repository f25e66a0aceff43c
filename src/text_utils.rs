use std::ops::Index;

use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})").unwrap();
    static ref DAY_FIRST_DATE: Regex = Regex::new(r"^(\d{1,2})[./-](\d{1,2})[./-](\d{4})$").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the date part of the formats found in post headers.
///
/// Accepts `2024-03-15`, `2024-03-15 10:42:32.123`, `2024-03-15T10:42:32Z`,
/// `15.03.2024`, `15/03/2024` and `15-03-2024`. The time part, when present,
/// is ignored.
pub fn parse_date(buf: &str) -> Result<NaiveDate, String> {
    let buf = buf.trim();
    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    let (y, m, d) = if let Some(caps) = ISO_DATE.captures(buf) {
        (to_i32(caps.index(1))?, to_u32(caps.index(2))?, to_u32(caps.index(3))?)
    } else if let Some(caps) = DAY_FIRST_DATE.captures(buf) {
        (to_i32(caps.index(3))?, to_u32(caps.index(2))?, to_u32(caps.index(1))?)
    } else {
        return Err(format!("Unable to parse date {}", buf));
    };

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| format!("Invalid date {}", buf))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> String {
    format_date(&Utc::now().date_naive())
}

pub fn strip_tags(html: &str) -> String {
    HTML_TAG.replace_all(html, "").to_string()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Turns heading text into an id fragment. Only ASCII word characters survive,
/// so `Muzeul Național de Artă!` becomes `muzeul-naional-de-art`.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&cleaned, "-");
    HYPHENS.replace_all(&hyphenated, "-").trim().to_string()
}

/// Lower-cases the text and joins whitespace runs with `-`.
pub fn hyphenate(text: &str) -> String {
    WHITESPACE.replace_all(&text.to_lowercase(), "-").to_string()
}

/// Key used to compare countries and cities: no diacritics, trimmed, upper case.
pub fn normalize_location(value: &str) -> String {
    unidecode(value).trim().to_uppercase()
}
