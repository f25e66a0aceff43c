use std::borrow::Cow;
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use spdlog::warn;

use crate::content::field_value::FieldValue;
use crate::locale::Locale;
use crate::text_utils::{format_date, parse_date, today};

pub const DEFAULT_IMAGE: &str = "/images/posts/default.jpg";

const CANONICAL_KEYS: [&str; 8] = ["title", "slug", "locale", "date", "featuredImage", "excerpt", "tags", "author"];
// Image file name synonyms when the post declares a `folder`
const FOLDER_IMAGE_KEYS: [&str; 5] = ["imagine", "imagine-big", "imagine-mobile", "image", "meta_image"];
const IMAGE_KEYS: [&str; 5] = ["featuredImage", "image", "meta_image", "imagine", "imagine-big"];
const EXCERPT_KEYS: [&str; 3] = ["excerpt", "descriere", "description"];

lazy_static! {
    static ref LEGACY_ASSET: Regex = Regex::new(r"^assets/images/travel/([^/]+)/(.+)$").unwrap();
    static ref MD_EXTENSION: Regex = Regex::new(r"\.(md|mdx)$").unwrap();
}

/// Canonical post metadata. Well-known fields are typed; every other key from
/// the source file is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub slug: String,
    pub locale: Locale,
    pub date: String,
    pub featured_image: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub author: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl FrontMatter {
    /// Looks a key up among the canonical fields first, then the extra ones.
    pub fn field(&self, key: &str) -> Option<Cow<'_, FieldValue>> {
        let owned = |s: &String| Some(Cow::Owned(FieldValue::String(s.clone())));
        match key {
            "title" => owned(&self.title),
            "slug" => owned(&self.slug),
            "locale" => Some(Cow::Owned(FieldValue::from(self.locale.as_str()))),
            "date" => owned(&self.date),
            "featuredImage" => owned(&self.featured_image),
            "excerpt" => owned(&self.excerpt),
            "author" => owned(&self.author),
            "tags" => Some(Cow::Owned(FieldValue::List(
                self.tags.iter().map(|t| FieldValue::from(t.as_str())).collect()
            ))),
            _ => self.extra.get(key).map(Cow::Borrowed),
        }
    }

    /// Non-empty text of a scalar field.
    pub fn text(&self, key: &str) -> Option<String> {
        self.field(key)
            .filter(|v| v.is_truthy())
            .and_then(|v| v.as_text())
    }

    /// First populated text among several synonym keys.
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.field(key)
            .filter(|v| v.is_truthy())
            .and_then(|v| v.as_int())
    }
}

/// Builds the canonical record out of the raw fields of `file_name`, found in
/// the `locale` content directory.
pub fn normalize(raw: BTreeMap<String, FieldValue>, file_name: &str, locale: Locale) -> FrontMatter {
    let text = |key: &str| raw.get(key).filter(|v| v.is_truthy()).and_then(|v| v.as_text());
    let first_text = |keys: &[&str]| keys.iter().find_map(|key| text(*key));

    let slug = text("slug").unwrap_or_else(|| MD_EXTENSION.replace(file_name, "").to_string());

    let featured_image = match text("folder") {
        Some(folder) => match first_text(&FOLDER_IMAGE_KEYS) {
            Some(image) => canonical_asset_path(&image).unwrap_or_else(|| {
                format!("/images/travel/{}/{}", folder, image.strip_prefix('/').unwrap_or(&image))
            }),
            None => DEFAULT_IMAGE.to_string(),
        },
        None => match first_text(&IMAGE_KEYS) {
            Some(image) => canonical_asset_path(&image).unwrap_or(image),
            None => DEFAULT_IMAGE.to_string(),
        },
    };

    let post_locale = match text("locale") {
        Some(value) => value.parse::<Locale>().unwrap_or_else(|e| {
            warn!("{} - file={}, using {}", e, file_name, locale);
            locale
        }),
        None => locale,
    };

    let tags = match raw.get("tags") {
        Some(FieldValue::List(items)) => items.iter().filter_map(|t| t.as_text()).collect(),
        Some(value) if value.is_truthy() => value.as_text().into_iter().collect(),
        _ => vec![],
    };

    let date = normalize_date(&raw, file_name);

    let extra = raw.iter()
        .filter(|(key, _)| !CANONICAL_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone().stringify_dates()))
        .collect();

    FrontMatter {
        title: text("title").unwrap_or_default(),
        slug,
        locale: post_locale,
        date,
        featured_image,
        excerpt: first_text(&EXCERPT_KEYS).unwrap_or_default(),
        tags,
        author: text("author").unwrap_or_default(),
        extra,
    }
}

/// `assets/images/travel/{folder}/{file}`, with or without a leading slash,
/// becomes `/images/travel/{folder}/{file}`.
pub fn canonical_asset_path(path: &str) -> Option<String> {
    let path = path.strip_prefix('/').unwrap_or(path);
    LEGACY_ASSET.captures(path).map(|caps| format!("/images/travel/{}/{}", &caps[1], &caps[2]))
}

fn normalize_date(raw: &BTreeMap<String, FieldValue>, file_name: &str) -> String {
    for key in ["date", "date-modified"] {
        match raw.get(key) {
            Some(FieldValue::Date(date)) => return format_date(date),
            Some(value) if value.is_truthy() => {
                let text = value.as_text().unwrap_or_default();
                match parse_date(&text) {
                    Ok(date) => return format_date(&date),
                    Err(e) => warn!("{} in field {} - file={}", e, key, file_name),
                }
            }
            _ => {}
        }
    }

    let now = today();
    warn!("No usable date - file={}, using {}", file_name, now);
    now
}
