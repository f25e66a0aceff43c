use std::collections::HashMap;
use std::path::{Path, PathBuf};

use spdlog::{info, warn};

use crate::content::content_file::ContentFile;
use crate::content::Post;
use crate::locale::Locale;
use crate::post_list::PostList;
use crate::render_post::render_slug;
use crate::text_utils::normalize_location;

pub const DEFAULT_RELATED_LIMIT: usize = 7;

/// Every post of one locale, read once and indexed by slug. Posts are kept
/// newest first.
pub struct Corpus {
    locale: Locale,
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
}

impl Corpus {
    pub fn build(content_dir: &Path, locale: Locale) -> Corpus {
        let files = PostList::new(content_dir, locale).retrieve_files();
        let mut posts = Vec::with_capacity(files.len());
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for file_path in files {
            let content_file = match ContentFile::from_file(file_path.clone(), locale) {
                Ok(file) => file,
                Err(e) => {
                    warn!("Skipping {}: {}", file_path.display(), e);
                    continue;
                }
            };

            let slug = content_file.front_matter.slug.clone();
            if let Some(first) = seen.get(&slug) {
                warn!("Duplicate slug {} in {}, keeping {} and dropping {}",
                    slug, locale, first.display(), file_path.display());
                continue;
            }
            seen.insert(slug, file_path);

            posts.push(Post {
                front_matter: content_file.front_matter,
                content: content_file.body,
                html_content: String::new(),
                table_of_contents: vec![],
            });
        }

        info!("Loaded {} posts for locale {}", posts.len(), locale);
        Self::from_posts(locale, posts)
    }

    pub fn from_posts(locale: Locale, mut posts: Vec<Post>) -> Corpus {
        posts.sort_by(|a, b| b.front_matter.date.cmp(&a.front_matter.date));
        let by_slug = posts.iter()
            .enumerate()
            .map(|(i, post)| (post.front_matter.slug.clone(), i))
            .collect();

        Corpus {
            locale,
            posts,
            by_slug,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn slugs(&self) -> Vec<String> {
        self.posts.iter().map(|p| p.front_matter.slug.clone()).collect()
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.by_slug.get(slug).map(|i| &self.posts[*i])
    }

    /// Posts whose `oras` (or `city`) matches `city` ignoring case, without the
    /// post `current_slug` itself.
    pub fn related_by_city(&self, city: &str, current_slug: &str, limit: usize) -> Vec<&Post> {
        if city.is_empty() {
            return vec![];
        }
        let city = city.to_lowercase();

        self.posts.iter()
            .filter(|post| post.front_matter.slug != current_slug)
            .filter(|post| {
                post.front_matter.first_text(&["oras", "city"])
                    .map(|c| c.to_lowercase() == city)
                    .unwrap_or(false)
            })
            .take(limit)
            .collect()
    }

    /// Posts located in `location`, matched against the country or the city
    /// without diacritics and case.
    pub fn by_location(&self, location: &str) -> Vec<&Post> {
        let location = normalize_location(location);
        if location.is_empty() {
            return vec![];
        }

        self.posts.iter()
            .filter(|post| {
                country_of(post).map(|c| normalize_location(&c)) == Some(location.clone())
                    || city_of(post, self.locale).map(|c| normalize_location(&c)) == Some(location.clone())
            })
            .collect()
    }

    /// Attraction pages of the city `city_id`, in listing order: by `position`,
    /// unpositioned ones last.
    pub fn attractions_of(&self, city_id: &str) -> Vec<&Post> {
        let mut attractions: Vec<&Post> = self.posts.iter()
            .filter(|post| post.front_matter.text("layout").as_deref() == Some("travel-attraction"))
            .filter(|post| post.front_matter.text("id-oras").as_deref() == Some(city_id))
            .collect();
        attractions.sort_by_key(|post| post.front_matter.int("position").unwrap_or(9999));
        attractions
    }

    /// The "lv" landing page of the city `city_id` that lists anchors.
    pub fn landing_of(&self, city_id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| {
            let fm = &post.front_matter;
            fm.text("subcat").as_deref() == Some("lv")
                && city_id_of(post).as_deref() == Some(city_id)
                && !anchors_of(post).is_empty()
        })
    }
}

pub fn country_of(post: &Post) -> Option<String> {
    post.front_matter.first_text(&["tara", "country"])
}

pub fn city_of(post: &Post, locale: Locale) -> Option<String> {
    match locale {
        Locale::Ro => post.front_matter.text("oras"),
        Locale::En => post.front_matter.first_text(&["city", "oras"]),
    }
}

pub fn city_id_of(post: &Post) -> Option<String> {
    post.front_matter.first_text(&["id-oras", "idOras"])
}

pub fn anchors_of(post: &Post) -> Vec<String> {
    post.front_matter.field("anchors")
        .and_then(|value| value.as_list().map(|items| items.iter().filter_map(|a| a.as_text()).collect()))
        .unwrap_or_default()
}

/// The accessors of the blog, with every call reading the content tree again.
pub struct ContentStore {
    pub content_dir: PathBuf,
    pub public_dir: PathBuf,
    pub related_limit: usize,
}

impl ContentStore {
    pub fn new(content_dir: PathBuf, public_dir: PathBuf) -> ContentStore {
        ContentStore {
            content_dir,
            public_dir,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    pub fn corpus(&self, locale: Locale) -> Corpus {
        Corpus::build(&self.content_dir, locale)
    }

    pub fn all_posts(&self, locale: Locale) -> Vec<Post> {
        self.corpus(locale).posts
    }

    pub fn all_post_slugs(&self, locale: Locale) -> Vec<String> {
        self.corpus(locale).slugs()
    }

    /// The post fully rendered, with its table of contents.
    pub fn post_by_slug(&self, slug: &str, locale: Locale) -> Option<Post> {
        render_slug(&self.corpus(locale), slug, &self.public_dir)
    }

    pub fn related_posts_by_city(&self, city: &str, current_slug: &str, locale: Locale) -> Vec<Post> {
        self.corpus(locale)
            .related_by_city(city, current_slug, self.related_limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn posts_by_location(&self, location: &str, locale: Locale) -> Vec<Post> {
        self.corpus(locale)
            .by_location(location)
            .into_iter()
            .cloned()
            .collect()
    }
}
