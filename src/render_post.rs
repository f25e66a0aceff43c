use std::path::Path;

use spdlog::{debug, error};

use crate::content::markdown_renderer::render_markdown;
use crate::content::Post;
use crate::corpus::Corpus;
use crate::includes::{render_include, IncludeContext};
use crate::post_processor::{instrument_headings, optimize_images, rewrite_legacy_image_paths};
use crate::template_tags::{interpolate_page_fields, resolve_tags};

/// Full render of a single post: template tags, Markdown, includes, and the
/// HTML passes. `corpus` is the post's locale, used by includes that look at
/// other posts.
pub fn render_post(post: &Post, corpus: &Corpus, public_dir: &Path) -> Post {
    let fm = &post.front_matter;
    let resolved = resolve_tags(&post.content, fm);

    let html = match render_markdown(&resolved.markdown) {
        Ok(html) => html,
        Err(e) => {
            error!("Error rendering {}: {}", fm.slug, e);
            String::new()
        }
    };

    // tags that ended up inside attributes; fragments carry other posts' data
    // and are spliced in afterwards
    let mut html = interpolate_page_fields(&html, fm);

    // cross-post data lives in the corpus, so links and labels follow its locale
    let ctx = IncludeContext {
        front_matter: fm,
        locale: corpus.locale(),
        corpus,
        public_dir,
    };
    for slot in resolved.slots.iter() {
        debug!("Filling {:?} in {}", slot.include, fm.slug);
        let fragment = render_include(&slot.include, &ctx);
        html = html.replace(&slot.placeholder, &fragment);
    }

    let html = rewrite_legacy_image_paths(&html);
    let html = optimize_images(&html);
    let (html_content, table_of_contents) = instrument_headings(&html);

    Post {
        front_matter: post.front_matter.clone(),
        content: post.content.clone(),
        html_content,
        table_of_contents,
    }
}

/// Looks `slug` up in the corpus and renders it.
pub fn render_slug(corpus: &Corpus, slug: &str, public_dir: &Path) -> Option<Post> {
    corpus.post_by_slug(slug).map(|post| render_post(post, corpus, public_dir))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::includes::tests::post;
    use crate::locale::Locale;
    use crate::test_data::{write_post, ATTRACTION_POST, CITY_POST, LANDING_POST};

    use super::*;

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        write_post(&content, "ro/sibiu/muzeul-brukenthal.md", ATTRACTION_POST);
        write_post(&content, "ro/sibiu/ce-sa-vezi-in-sibiu.md", CITY_POST);
        write_post(&content, "ro/sibiu/locuri-de-vizitat-sibiu.md", LANDING_POST);
        write_post(&content, "ro/sibiu/turnul-sfatului.md",
            "---\ntitle: Turnul Sfatului\nlayout: travel-attraction\nid-oras: 12\nposition: 2\ndate: 2024-02-01\n---\nText");
        write_post(&content, "ro/sibiu/podul-minciunilor.md",
            "---\ntitle: Podul Minciunilor\nlayout: travel-attraction\nid-oras: 12\nposition: 3\ndate: 2024-02-02\n---\nText");

        let gallery = tmp.path().join("public/images/travel/brukenthal/galerie");
        fs::create_dir_all(&gallery).unwrap();
        fs::write(gallery.join("sala.jpg"), b"").unwrap();
        tmp
    }

    #[test]
    fn test_attraction_page() {
        let tmp = site();
        let corpus = Corpus::build(&tmp.path().join("content"), Locale::Ro);
        let post = render_slug(&corpus, "muzeul-brukenthal", &tmp.path().join("public")).unwrap();
        let html = &post.html_content;

        assert!(html.contains("cel mai vechi muzeu din Sibiu."));
        assert!(html.contains("https://www.google.com/maps?q=45.7969,24.1522"));
        assert!(html.contains("src=\"/images/travel/brukenthal/fatada.jpg\""));
        assert!(!html.contains("assets/images"));
        assert!(html.contains("/images/travel/brukenthal/galerie/sala.jpg"));
        assert!(html.contains("Vezi și:"));
        assert!(html.contains("href=\"/ro/locuri-de-vizitat-sibiu#"));
        assert!(!html.contains("INCLUDE_PLACEHOLDER"));
        assert!(!html.contains("{%"));

        let ids: Vec<&str> = post.table_of_contents.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["heading-1-istoric", "heading-2-program", "heading-3-galerie-foto"]);
        assert_eq!(html.matches("<img").count(), html.matches("decoding=").count());
    }

    #[test]
    fn test_city_page_lists_attractions() {
        let tmp = site();
        let corpus = Corpus::build(&tmp.path().join("content"), Locale::Ro);
        let post = render_slug(&corpus, "ce-sa-vezi-in-sibiu", &tmp.path().join("public")).unwrap();
        let html = &post.html_content;

        let first = html.find("1. Muzeul Național Brukenthal").unwrap();
        let second = html.find("2. Turnul Sfatului").unwrap();
        assert!(first < second);
        assert!(!html.contains("Podul Minciunilor"));
        assert!(html.contains("Căutați cazare?"));
        assert!(html.contains("Cel mai vechi muzeu din România."));
        assert_eq!(post.table_of_contents.len(), 2);
        assert_eq!(post.table_of_contents[0].id, "heading-1-1-muzeul-naional-brukenthal");
    }

    #[test]
    fn test_three_headings() {
        let corpus = Corpus::from_posts(Locale::En, vec![]);
        let mut source = post("title: Three", "three.md", Locale::En);
        source.content = "## First\n\ntext\n\n## Second\n\n## Third\n".to_string();

        let rendered = render_post(&source, &corpus, Path::new("/nonexistent"));
        let toc = &rendered.table_of_contents;
        assert_eq!(toc.len(), 3);
        assert_eq!(toc.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(), vec!["First", "Second", "Third"]);
        assert_ne!(toc[0].id, toc[1].id);
        assert_ne!(toc[1].id, toc[2].id);
        for entry in toc {
            assert!(rendered.html_content.contains(&format!("<h2 id=\"{}\">{}</h2>", entry.id, entry.text)));
            assert_eq!(entry.level, 2);
        }
    }

    #[test]
    fn test_page_fields_in_attributes() {
        let corpus = Corpus::from_posts(Locale::Ro, vec![]);
        let mut source = post("title: Bran\nfolder: bran", "bran.md", Locale::Ro);
        source.content = "<img src=\"/images/travel/{{ page.folder }}/x.jpg\">\n\n{{ missing }}".to_string();

        let rendered = render_post(&source, &corpus, Path::new("/nonexistent"));
        assert!(rendered.html_content.contains("src=\"/images/travel/bran/x.jpg\""));
        assert!(rendered.html_content.contains("{{ missing }}"));
        assert_eq!(rendered.content, source.content);
    }

    #[test]
    fn test_includes_follow_corpus_locale() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        write_post(&content, "ro/sibiu/ce-sa-vezi.md",
            "---\ntitle: Ce să vezi\nlocale: en\ncat: blog-oras\nid-oras: 12\nno-atractii: 1\n---\n{% include locuri-de-vizitat.html %}\n\n{% include cta-cazare.html %}\n");
        write_post(&content, "ro/sibiu/turn.md",
            "---\ntitle: Turnul Sfatului\nlayout: travel-attraction\nid-oras: 12\nposition: 1\n---\nText");

        let corpus = Corpus::build(&content, Locale::Ro);
        let post = render_slug(&corpus, "ce-sa-vezi", &tmp.path().join("public")).unwrap();
        let html = &post.html_content;

        assert_eq!(post.front_matter.locale, Locale::En);
        assert!(html.contains("href=\"/ro/turn\""));
        assert!(!html.contains("/en/turn"));
        assert!(html.contains("Căutați cazare?"));
        assert!(html.contains("Citește articolul complet"));
    }

    #[test]
    fn test_included_fields_keep_their_own_tags() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        write_post(&content, "ro/sibiu/oras.md",
            "---\ntitle: Orasul Sibiu\ncat: blog-oras\nid-oras: 12\nno-atractii: 1\n---\n{% include locuri-de-vizitat.html %}\n");
        write_post(&content, "ro/sibiu/turn.md",
            "---\ntitle: Turnul Sfatului\nlayout: travel-attraction\nid-oras: 12\nposition: 1\ntext-intro: 'Despre {{ page.title }} aici.'\n---\nText");

        let corpus = Corpus::build(&content, Locale::Ro);
        let post = render_slug(&corpus, "oras", &tmp.path().join("public")).unwrap();

        assert!(post.html_content.contains("Despre {{ page.title }} aici."));
        assert!(!post.html_content.contains("Despre Orasul Sibiu aici."));
    }
}
