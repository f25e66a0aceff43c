use std::path::Path;

use ramhorns::Template;
use spdlog::{debug, error};

use crate::content::front_matter::FrontMatter;
use crate::corpus::Corpus;
use crate::locale::Locale;

mod accommodation;
mod backlink;
mod contact;
mod gallery;
mod places;

pub use backlink::anchor_hash;
pub use gallery::{list_gallery_images, GalleryImage};

/// The `{% include name %}` directives posts may use.
#[derive(Debug, Clone, PartialEq)]
pub enum Include {
    ContactBox,
    AccommodationCta,
    PlacesToVisit,
    Backlink,
    Gallery,
    /// Declared hooks that render nothing.
    Tickets,
    Sidebar,
    Unknown(String),
}

impl Include {
    pub fn from_name(name: &str) -> Include {
        match name {
            "contacte-atractie.html" => Include::ContactBox,
            "cta-cazare.html" => Include::AccommodationCta,
            "locuri-de-vizitat.html" => Include::PlacesToVisit,
            "a-anchor-backlink.html" => Include::Backlink,
            "galerie-atractie.html" => Include::Gallery,
            "bilete.html" => Include::Tickets,
            "sidebar-atractie.html" => Include::Sidebar,
            other => Include::Unknown(other.to_string()),
        }
    }
}

/// What a generator may look at: the post being rendered, the rest of its
/// locale, and the public directory for gallery scans.
pub struct IncludeContext<'a> {
    pub front_matter: &'a FrontMatter,
    pub locale: Locale,
    pub corpus: &'a Corpus,
    pub public_dir: &'a Path,
}

/// HTML for one include. An empty string means nothing to show.
pub fn render_include(include: &Include, ctx: &IncludeContext) -> String {
    match include {
        Include::ContactBox => contact::render(ctx),
        Include::AccommodationCta => accommodation::render(ctx),
        Include::PlacesToVisit => places::render(ctx),
        Include::Backlink => backlink::render(ctx),
        Include::Gallery => gallery::render(ctx),
        Include::Tickets | Include::Sidebar => String::new(),
        Include::Unknown(name) => {
            debug!("Unknown include {} in {}", name, ctx.front_matter.slug);
            String::new()
        }
    }
}

fn render_template<C: ramhorns::Content>(name: &str, source: &str, content: &C) -> String {
    match Template::new(source) {
        Ok(template) => template.render(content),
        Err(e) => {
            error!("Error parsing {} template: {}", name, e);
            String::new()
        }
    }
}

/// Percent-encodes a single URL component.
pub(crate) fn url_encode(value: &str) -> String {
    match serde_urlencoded::to_string(&[("", value)]) {
        Ok(encoded) => encoded.strip_prefix('=').unwrap_or(&encoded).to_string(),
        Err(e) => {
            error!("Error encoding {}: {}", value, e);
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use crate::content::front_matter::normalize;
    use crate::content::parsing_utils::parse_front_matter;
    use crate::content::Post;

    use super::*;

    pub fn front_matter(yaml: &str, file_name: &str, locale: Locale) -> FrontMatter {
        normalize(parse_front_matter(Path::new(file_name), yaml), file_name, locale)
    }

    pub fn post(yaml: &str, file_name: &str, locale: Locale) -> Post {
        Post {
            front_matter: front_matter(yaml, file_name, locale),
            content: String::new(),
            html_content: String::new(),
            table_of_contents: vec![],
        }
    }

    pub fn render_for(include: Include, yaml: &str, locale: Locale, corpus: &Corpus) -> String {
        let fm = front_matter(yaml, "current.md", locale);
        let ctx = IncludeContext {
            front_matter: &fm,
            locale,
            corpus,
            public_dir: Path::new("/nonexistent"),
        };
        render_include(&include, &ctx)
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Include::from_name("contacte-atractie.html"), Include::ContactBox);
        assert_eq!(Include::from_name("cta-cazare.html"), Include::AccommodationCta);
        assert_eq!(Include::from_name("locuri-de-vizitat.html"), Include::PlacesToVisit);
        assert_eq!(Include::from_name("a-anchor-backlink.html"), Include::Backlink);
        assert_eq!(Include::from_name("galerie-atractie.html"), Include::Gallery);
        assert_eq!(Include::from_name("bilete.html"), Include::Tickets);
        assert_eq!(Include::from_name("footer.html"), Include::Unknown("footer.html".to_string()));
    }

    #[test]
    fn test_reserved_includes_render_nothing() {
        let corpus = Corpus::from_posts(Locale::Ro, vec![]);
        let yaml = "title: x\nwebsite: https://example.com";
        assert_eq!(render_for(Include::Sidebar, yaml, Locale::Ro, &corpus), "");
        assert_eq!(render_for(Include::Tickets, yaml, Locale::Ro, &corpus), "");
        assert_eq!(render_for(Include::Unknown("x.html".to_string()), yaml, Locale::Ro, &corpus), "");
    }

    #[test]
    fn test_url_encode() {
        assert_eq!(url_encode("piața-mare"), "pia%C8%9Ba-mare");
        assert_eq!(url_encode("Str. Mare 5, Sibiu"), "Str.+Mare+5%2C+Sibiu");
        assert_eq!(url_encode(""), "");
    }
}
