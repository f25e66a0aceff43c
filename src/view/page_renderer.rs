use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Post;
use crate::locale::Locale;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewToc<'a> {
    id: &'a str,
    text: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewRelated<'a> {
    title: &'a str,
    href: String,
    image: &'a str,
    date: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewPage<'a> {
    locale: &'a str,
    title: &'a str,
    date: &'a str,
    author: &'a str,
    excerpt: &'a str,
    featured_image: &'a str,
    tags: Vec<ViewTag<'a>>,
    has_toc: bool,
    toc_title: &'a str,
    toc: Vec<ViewToc<'a>>,
    html_content: &'a str,
    has_related: bool,
    related_title: &'a str,
    related: Vec<ViewRelated<'a>>,
}

/// Full HTML page of a rendered post.
pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new(page_tpl_src: &str) -> io::Result<PageRenderer> {
        let template = match Template::new(page_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page template: {}", e)));
            }
        };

        Ok(PageRenderer {
            template,
        })
    }

    /// `post` must already be rendered; `related` only needs front matter.
    pub fn render(&self, post: &Post, related: &[Post], locale: Locale) -> String {
        let fm = &post.front_matter;
        let tags = fm.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let toc: Vec<ViewToc> = post.table_of_contents.iter()
            .map(|entry| ViewToc { id: &entry.id, text: &entry.text })
            .collect();
        let related: Vec<ViewRelated> = related.iter()
            .map(|r| ViewRelated {
                title: &r.front_matter.title,
                href: format!("/{}/{}", locale, r.slug()),
                image: &r.front_matter.featured_image,
                date: &r.front_matter.date,
            })
            .collect();

        self.template.render(&ViewPage {
            locale: locale.as_str(),
            title: &fm.title,
            date: &fm.date,
            author: &fm.author,
            excerpt: &fm.excerpt,
            featured_image: &fm.featured_image,
            tags,
            has_toc: !toc.is_empty(),
            toc_title: locale.pick("Cuprins", "Contents"),
            toc,
            html_content: &post.html_content,
            has_related: !related.is_empty(),
            related_title: locale.pick("Articole din același oraș", "More from this city"),
            related,
        })
    }
}
