use std::path::{Path, PathBuf};

use spdlog::{debug, warn};
use walkdir::WalkDir;

use crate::content::content_file::ContentFile;
use crate::locale::Locale;

/// Source files of one locale, found below `{content_dir}/{locale}`.
pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(content_dir: &Path, locale: Locale) -> PostList {
        PostList {
            root_dir: content_dir.join(locale.as_str()),
        }
    }

    /// Every `.md`/`.mdx` file under the locale directory, at any depth, in
    /// path order. A missing directory is an empty list.
    pub fn retrieve_files(&self) -> Vec<PathBuf> {
        if !self.root_dir.is_dir() {
            debug!("No content directory at {}", self.root_dir.display());
            return vec![];
        }

        let mut posts = vec![];
        for entry in WalkDir::new(&self.root_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry below {}: {}", self.root_dir.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_file() && ContentFile::guess_type(entry.path()).is_some() {
                posts.push(entry.into_path());
            }
        }
        posts
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_recursive_sorted_walk() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("ro");
        fs::create_dir_all(root.join("sibiu/muzee")).unwrap();
        fs::create_dir_all(root.join("brasov")).unwrap();
        fs::write(root.join("sibiu/muzee/brukenthal.mdx"), "").unwrap();
        fs::write(root.join("sibiu/index.md"), "").unwrap();
        fs::write(root.join("brasov/biserica-neagra.md"), "").unwrap();
        fs::write(root.join("brasov/notes.txt"), "").unwrap();
        fs::write(root.join("about.md"), "").unwrap();

        let files = PostList::new(tmp.path(), Locale::Ro).retrieve_files();
        let relative: Vec<String> = files.iter()
            .map(|p| p.strip_prefix(&root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(relative, vec![
            "about.md",
            "brasov/biserica-neagra.md",
            "sibiu/index.md",
            "sibiu/muzee/brukenthal.mdx",
        ]);
    }

    #[test]
    fn test_missing_locale_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(PostList::new(tmp.path(), Locale::En).retrieve_files().is_empty());
    }
}
