use lazy_static::lazy_static;
use regex::{Captures, Regex};
use uuid::Uuid;

use crate::content::field_value::FieldValue;
use crate::content::front_matter::FrontMatter;
use crate::includes::Include;

lazy_static! {
    static ref PAGE_VARIABLE: Regex = Regex::new(r"(?i)\{\{\s*page\.([^}]+)\s*\}\}").unwrap();
    static ref VARIABLE: Regex = Regex::new(r"(?i)\{\{\s*([^}]+)\s*\}\}").unwrap();
    static ref INCLUDE_TAG: Regex = Regex::new(r"(?i)\{%\s*include\s+([^%]+)\s*%\}").unwrap();
    static ref BLOCK_TAG: Regex = Regex::new(r"\{%[^%]*%\}").unwrap();
}

/// An include directive swapped out for an HTML comment before the Markdown
/// pass, to be filled in once the body is HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeSlot {
    pub placeholder: String,
    pub include: Include,
}

pub struct ResolvedBody {
    pub markdown: String,
    pub slots: Vec<IncludeSlot>,
}

/// Runs the substitutions that happen before Markdown conversion:
/// variable interpolation, include placeholders, and removal of every other
/// `{% ... %}` tag.
pub fn resolve_tags(body: &str, front_matter: &FrontMatter) -> ResolvedBody {
    let body = interpolate(body, front_matter);
    let (body, slots) = replace_includes(&body);
    let markdown = BLOCK_TAG.replace_all(&body, "").to_string();

    ResolvedBody {
        markdown,
        slots,
    }
}

/// Replaces `{{ page.field }}` and `{{ field }}` with front matter values.
/// Anything that does not resolve is left as written.
pub fn interpolate(text: &str, front_matter: &FrontMatter) -> String {
    let text = interpolate_page_fields(text, front_matter);

    VARIABLE.replace_all(&text, |caps: &Captures| {
        let path = &caps[1];
        // filters are not supported
        if path.contains("page.") || path.contains('|') {
            return caps[0].to_string();
        }
        lookup(front_matter, path.trim()).unwrap_or_else(|| caps[0].to_string())
    }).to_string()
}

/// Only the `{{ page.field }}` form.
pub fn interpolate_page_fields(text: &str, front_matter: &FrontMatter) -> String {
    PAGE_VARIABLE.replace_all(text, |caps: &Captures| {
        lookup(front_matter, caps[1].trim()).unwrap_or_else(|| caps[0].to_string())
    }).to_string()
}

fn replace_includes(text: &str) -> (String, Vec<IncludeSlot>) {
    let nonce = Uuid::new_v4().simple().to_string();
    let mut slots = vec![];

    let replaced = INCLUDE_TAG.replace_all(text, |caps: &Captures| {
        let placeholder = format!("<!--INCLUDE_PLACEHOLDER_{}_{}-->", nonce, slots.len());
        slots.push(IncludeSlot {
            placeholder: placeholder.clone(),
            include: Include::from_name(caps[1].trim()),
        });
        placeholder
    }).to_string();

    (replaced, slots)
}

/// Walks a dotted path through the front matter. Empty values count as
/// missing.
fn lookup(front_matter: &FrontMatter, path: &str) -> Option<String> {
    let path = path.strip_prefix("page.").unwrap_or(path);
    let mut parts = path.split('.');
    let first = parts.next()?;
    let mut value = front_matter.field(first)?.into_owned();

    for part in parts {
        value = match value {
            FieldValue::Map(mut map) => map.remove(part)?,
            _ => return None,
        };
    }

    if !value.is_truthy() {
        return None;
    }

    match value {
        FieldValue::List(items) => {
            let joined = items.iter()
                .map(|item| match item {
                    FieldValue::List(_) | FieldValue::Map(_) => serde_json::to_string(item).unwrap_or_default(),
                    scalar => scalar.as_text().unwrap_or_default(),
                })
                .collect::<Vec<String>>()
                .join(", ");
            Some(joined).filter(|s| !s.is_empty())
        }
        FieldValue::Map(_) => serde_json::to_string(&value).ok(),
        scalar => scalar.as_text(),
    }
}
