use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::Path;

use spdlog::{info, warn};

use crate::config::Config;
use crate::content::Post;
use crate::corpus::Corpus;
use crate::locale::Locale;
use crate::render_post::render_slug;
use crate::text_utils::today;
use crate::view::list_renderer::ListRenderer;
use crate::view::page_renderer::PageRenderer;
use crate::view::sitemap_renderer::Sitemap;

pub const POST_TEMPLATE: &str = "post.tpl";
pub const LIST_TEMPLATE: &str = "list.tpl";

pub fn load_template(template_dir: &Path, name: &str) -> io::Result<String> {
    let template_path = template_dir.join(name);
    match fs::read_to_string(&template_path) {
        Ok(src) => Ok(src),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error reading template {}: {}", template_path.display(), e))),
    }
}

/// HTML page of `slug`, or `None` when the locale has no such post.
pub fn render_post_page(corpus: &Corpus, slug: &str, public_dir: &Path, related_limit: usize,
                        template_src: &str) -> io::Result<Option<String>> {
    let post = match render_slug(corpus, slug, public_dir) {
        Some(post) => post,
        None => return Ok(None),
    };

    let city = post.front_matter.first_text(&["oras", "city"]).unwrap_or_default();
    let related: Vec<Post> = corpus.related_by_city(&city, slug, related_limit)
        .into_iter()
        .cloned()
        .collect();

    let renderer = PageRenderer::new(template_src)?;
    Ok(Some(renderer.render(&post, &related, corpus.locale())))
}

pub fn render_post_list<'p, I>(posts: I, heading: &str, locale: Locale, template_src: &str) -> io::Result<String>
where
    I: IntoIterator<Item=&'p Post>,
{
    let renderer = ListRenderer::new(template_src)?;
    Ok(renderer.render(posts, heading, locale))
}

pub fn render_sitemap<'c, I>(config: &Config, corpora: I) -> io::Result<Vec<u8>>
where
    I: IntoIterator<Item=&'c Corpus>,
{
    let sitemap = Sitemap {
        site_url: &config.site.url,
        default_locale: config.site.default_locale,
    };
    match sitemap.render(corpora, &today()) {
        Ok(xml) => Ok(xml),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidData, format!("Error writing sitemap: {}", e))),
    }
}

/// Renders the whole site below `out_dir`: `{locale}/index.html`,
/// `{locale}/{slug}/index.html` and `sitemap.xml`. Returns the number of
/// posts written.
pub fn build_site(config: &Config, out_dir: &Path) -> io::Result<usize> {
    let post_tpl = load_template(&config.paths.template_dir, POST_TEMPLATE)?;
    let list_tpl = load_template(&config.paths.template_dir, LIST_TEMPLATE)?;

    let corpora: Vec<Corpus> = config.site.locales.iter()
        .map(|locale| Corpus::build(&config.paths.content_dir, *locale))
        .collect();

    let mut written = 0;
    for corpus in corpora.iter() {
        let locale = corpus.locale();
        let locale_dir = out_dir.join(locale.as_str());
        fs::create_dir_all(&locale_dir)?;

        let heading = locale.pick("Articole", "Posts");
        let list = render_post_list(corpus.posts(), heading, locale, &list_tpl)?;
        fs::write(locale_dir.join("index.html"), list)?;

        for slug in corpus.slugs() {
            let page = render_post_page(corpus, &slug, &config.paths.public_dir,
                                        config.defaults.related_posts_limit, &post_tpl)?;
            match page {
                Some(page) => {
                    let post_dir = locale_dir.join(&slug);
                    fs::create_dir_all(&post_dir)?;
                    fs::write(post_dir.join("index.html"), page)?;
                    written += 1;
                }
                None => warn!("Post {} vanished from {}", slug, locale),
            }
        }
        info!("Wrote {} posts for {}", corpus.len(), locale);
    }

    fs::write(out_dir.join("sitemap.xml"), render_sitemap(config, &corpora)?)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::config::parse_config;
    use crate::test_data::{write_post, ATTRACTION_POST};

    use super::*;

    fn site() -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_post(&root.join("content"), "ro/sibiu/muzeul-brukenthal.md", ATTRACTION_POST);
        write_post(&root.join("content"), "ro/sibiu/turnul-sfatului.md",
            "---\ntitle: Turnul Sfatului\ndate: 2024-02-01\noras: Sibiu\n---\n## Istoric\n\nText");
        write_post(&root.join("content"), "en/sibiu/brukenthal.md",
            "---\ntitle: Brukenthal Museum\ndate: 2024-03-15\ncity: Sibiu\n---\nText");

        fs::create_dir_all(root.join("template")).unwrap();
        fs::write(root.join("template").join(POST_TEMPLATE),
            "<h1>{{title}}</h1>{{{html_content}}}{{#related}}<a href=\"{{href}}\">{{title}}</a>{{/related}}").unwrap();
        fs::write(root.join("template").join(LIST_TEMPLATE),
            "{{#post_list}}<a href=\"{{link}}\">{{title}}</a>{{/post_list}}").unwrap();

        let cfg = parse_config(&format!(r#"
[site]
url = "https://calatorii.example"

[paths]
content_dir = "{root}/content"
public_dir = "{root}/public"
template_dir = "{root}/template"

[defaults]

[server]
address = "127.0.0.1"
port = 8001
"#, root = root.display())).unwrap();
        (tmp, cfg)
    }

    #[test]
    fn test_post_page_with_related() {
        let (_tmp, cfg) = site();
        let corpus = Corpus::build(&cfg.paths.content_dir, Locale::Ro);
        let tpl = load_template(&cfg.paths.template_dir, POST_TEMPLATE).unwrap();

        let page = render_post_page(&corpus, "muzeul-brukenthal", &cfg.paths.public_dir, 7, &tpl)
            .unwrap()
            .unwrap();
        assert!(page.starts_with("<h1>Muzeul Brukenthal</h1>"));
        assert!(page.contains("id=\"heading-1-istoric\""));
        assert!(page.contains("<a href=\"/ro/turnul-sfatului\">Turnul Sfatului</a>"));

        assert!(render_post_page(&corpus, "missing", &cfg.paths.public_dir, 7, &tpl).unwrap().is_none());
    }

    #[test]
    fn test_build_site() {
        let (tmp, cfg) = site();
        let out = tmp.path().join("out");

        assert_eq!(build_site(&cfg, &out).unwrap(), 3);
        assert!(out.join("ro/muzeul-brukenthal/index.html").is_file());
        assert!(out.join("en/brukenthal/index.html").is_file());

        let list = fs::read_to_string(out.join("ro/index.html")).unwrap();
        assert_eq!(list, "<a href=\"/ro/muzeul-brukenthal\">Muzeul Brukenthal</a><a href=\"/ro/turnul-sfatului\">Turnul Sfatului</a>");

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://calatorii.example/en/brukenthal</loc>"));
        assert!(sitemap.contains("<loc>https://calatorii.example/ro/location/sibiu</loc>"));
    }

    #[test]
    fn test_bundled_templates_parse() {
        assert!(PageRenderer::new(include_str!("../template/post.tpl")).is_ok());
        assert!(ListRenderer::new(include_str!("../template/list.tpl")).is_ok());
    }

    #[test]
    fn test_missing_template() {
        let tmp = TempDir::new().unwrap();
        let err = load_template(tmp.path(), POST_TEMPLATE).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
