use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::front_matter::{normalize, FrontMatter};
use crate::content::parsing_utils::{parse_front_matter, split_front_matter};
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentFormat {
    Markdown,
    Mdx,
}

pub struct ContentFile {
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub front_matter: FrontMatter,
    pub body: String,
}

impl ContentFile {
    pub fn from_file(file_path: PathBuf, locale: Locale) -> io::Result<ContentFile> {
        let raw_content = fs::read_to_string(&file_path)?;
        Self::from_string(file_path, &raw_content, locale)
    }

    pub fn from_string(file_path: PathBuf, raw_content: &str, locale: Locale) -> io::Result<ContentFile> {
        let format = match Self::guess_type(&file_path) {
            None => return Err(io::Error::new(ErrorKind::Unsupported, format!("Could not guess the type of the file {}", file_path.display()))),
            Some(format) => format,
        };

        let file_name = file_path.file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| io::Error::new(ErrorKind::InvalidInput, format!("Invalid post path {}", file_path.display())))?
            .to_string();

        let (yaml, body) = split_front_matter(raw_content);
        let raw_fields = yaml.map(|yaml| parse_front_matter(&file_path, yaml)).unwrap_or_default();
        let front_matter = normalize(raw_fields, &file_name, locale);

        Ok(ContentFile {
            file_path,
            format,
            front_matter,
            body: body.to_string(),
        })
    }

    pub fn guess_type(file_name: &Path) -> Option<ContentFormat> {
        match file_name.extension().and_then(|ext| ext.to_str()) {
            Some("md") => Some(ContentFormat::Markdown),
            Some("mdx") => Some(ContentFormat::Mdx),
            _ => None,
        }
    }
}
