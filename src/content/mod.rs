use serde::Serialize;

use crate::content::front_matter::FrontMatter;

pub mod content_file;
pub mod field_value;
pub mod front_matter;
pub mod markdown_renderer;
pub mod parsing_utils;

/// One entry of a post's table of contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// A post as read from disk. `html_content` and `table_of_contents` stay empty
/// until the post is rendered on its own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "frontmatter")]
    pub front_matter: FrontMatter,
    pub content: String,
    pub html_content: String,
    pub table_of_contents: Vec<TocEntry>,
}

impl Post {
    pub fn slug(&self) -> &str {
        &self.front_matter.slug
    }
}
