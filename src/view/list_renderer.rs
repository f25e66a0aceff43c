use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::category::category_name;
use crate::content::Post;
use crate::locale::Locale;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    locale: &'a str,
    heading: &'a str,
    post_list: Vec<PostItem<'a>>,
    is_empty: bool,
    empty_text: &'a str,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    date: &'a str,
    link: String,
    title: &'a str,
    excerpt: &'a str,
    image: &'a str,
    has_category: bool,
    category: String,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render<'p, I>(&self, posts: I, heading: &str, locale: Locale) -> String
    where
        I: IntoIterator<Item=&'p Post>,
    {
        let post_list: Vec<PostItem> = posts.into_iter()
            .map(|post| {
                let fm = &post.front_matter;
                let category = fm.text("cat").map(|code| category_name(&code, locale).to_string());
                PostItem {
                    date: &fm.date,
                    link: format!("/{}/{}", locale, post.slug()),
                    title: &fm.title,
                    excerpt: &fm.excerpt,
                    image: &fm.featured_image,
                    has_category: category.is_some(),
                    category: category.unwrap_or_default(),
                }
            })
            .collect();

        self.template.render(&ListPage {
            locale: locale.as_str(),
            heading,
            is_empty: post_list.is_empty(),
            post_list,
            empty_text: locale.pick("Nu am găsit articole.", "No posts found."),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::includes::tests::post;

    use super::*;

    const LIST_TPL: &str = "<h1>{{heading}}</h1>{{#post_list}}[{{link}}|{{title}}|{{date}}{{#has_category}}|{{category}}{{/has_category}}]{{/post_list}}{{#is_empty}}{{empty_text}}{{/is_empty}}";

    #[test]
    fn render_list() {
        let renderer = ListRenderer::new(LIST_TPL).unwrap();
        let posts = vec![
            post("title: Muzee & galerii\ndate: 2024-03-01\ncat: \"002\"", "muzee.md", Locale::Ro),
            post("title: Sibiu\ndate: 2024-01-01\ncat: blog-oras", "sibiu.md", Locale::Ro),
            post("title: Bran\ndate: 2023-01-01", "bran.md", Locale::Ro),
        ];

        let res = renderer.render(&posts, "România", Locale::Ro);
        assert_eq!(res, "<h1>România</h1>\
            [/ro/muzee|Muzee &amp; galerii|2024-03-01|Muzee și Galerii de Artă]\
            [/ro/sibiu|Sibiu|2024-01-01|blog-oras]\
            [/ro/bran|Bran|2023-01-01]");
    }

    #[test]
    fn render_empty_list() {
        let renderer = ListRenderer::new(LIST_TPL).unwrap();
        let res = renderer.render(&Vec::<Post>::new(), "Cluj", Locale::En);
        assert_eq!(res, "<h1>Cluj</h1>No posts found.");
    }
}
