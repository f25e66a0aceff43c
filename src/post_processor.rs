use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::content::TocEntry;
use crate::text_utils::{slugify, strip_tags};

lazy_static! {
    static ref LEGACY_IMAGE_SRC: Regex = Regex::new(r#"src=(["'])/?assets/images/travel/([^"']+)["']"#).unwrap();
    static ref IMG_TAG: Regex = Regex::new(r"(?i)<img([^>]*)>").unwrap();
    static ref LOADING_ATTR: Regex = Regex::new(r"loading\s*=").unwrap();
    static ref DECODING_ATTR: Regex = Regex::new(r"decoding\s*=").unwrap();
    static ref H2_TAG: Regex = Regex::new(r"(?is)<h2([^>]*)>(.*?)</h2>").unwrap();
    static ref ID_ATTR: Regex = Regex::new(r#"(?i)(^|\s)id\s*=\s*["'][^"']*["']"#).unwrap();
}

/// `src="/assets/images/travel/..."` and `src='assets/images/travel/...'`
/// both become `src="/images/travel/..."` (quote style kept).
pub fn rewrite_legacy_image_paths(html: &str) -> String {
    LEGACY_IMAGE_SRC.replace_all(html, |caps: &Captures| {
        format!("src={}/images/travel/{}{}", &caps[1], &caps[2], &caps[1])
    }).to_string()
}

/// Adds `loading="lazy"` and `decoding="async"` to every `<img>` missing them.
/// Running it again changes nothing.
pub fn optimize_images(html: &str) -> String {
    IMG_TAG.replace_all(html, |caps: &Captures| {
        let attributes = &caps[1];
        let (attributes, closing) = match attributes.strip_suffix('/') {
            Some(rest) => (rest.trim_end(), " />"),
            None => (attributes, ">"),
        };

        let mut optimized = attributes.to_string();
        if !LOADING_ATTR.is_match(attributes) {
            optimized.push_str(" loading=\"lazy\"");
        }
        if !DECODING_ATTR.is_match(attributes) {
            optimized.push_str(" decoding=\"async\"");
        }

        format!("<img{}{}", optimized, closing)
    }).to_string()
}

/// Gives every `<h2>` an `id` of the form `heading-{n}-{slug}` and collects
/// them in document order. Headings without text are left alone, but still
/// count.
pub fn instrument_headings(html: &str) -> (String, Vec<TocEntry>) {
    let mut toc = vec![];
    let mut counter = 0;

    let html = H2_TAG.replace_all(html, |caps: &Captures| {
        counter += 1;
        let attributes = &caps[1];
        let content = &caps[2];

        let text = strip_tags(content).trim().to_string();
        if text.is_empty() {
            return caps[0].to_string();
        }

        let id = format!("heading-{}-{}", counter, slugify(&text));
        let attributes = if ID_ATTR.is_match(attributes) {
            ID_ATTR.replace(attributes, |id_caps: &Captures| format!("{}id=\"{}\"", &id_caps[1], id)).to_string()
        } else {
            format!("{} id=\"{}\"", attributes, id)
        };

        toc.push(TocEntry {
            id,
            text,
            level: 2,
        });

        format!("<h2{}>{}</h2>", attributes, content)
    }).to_string();

    (html, toc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_legacy_image_paths() {
        let html = r#"<img src="/assets/images/travel/bran/a.jpg"><img src='assets/images/travel/bran/b.jpg'>"#;
        assert_eq!(
            rewrite_legacy_image_paths(html),
            r#"<img src="/images/travel/bran/a.jpg"><img src='/images/travel/bran/b.jpg'>"#
        );

        let untouched = r#"<img src="/images/travel/bran/a.jpg"><a href="/assets/images/travel/x.jpg">x</a>"#;
        assert_eq!(rewrite_legacy_image_paths(untouched), untouched);
    }

    #[test]
    fn test_optimize_images() {
        assert_eq!(
            optimize_images(r#"<p><img src="a.jpg" alt="A"></p>"#),
            r#"<p><img src="a.jpg" alt="A" loading="lazy" decoding="async"></p>"#
        );
        assert_eq!(
            optimize_images(r#"<img src="a.jpg" loading="eager" />"#),
            r#"<img src="a.jpg" loading="eager" decoding="async" />"#
        );
        assert_eq!(
            optimize_images(r#"<IMG src="a.jpg" decoding="sync"/>"#),
            r#"<img src="a.jpg" decoding="sync" loading="lazy" />"#
        );
    }

    #[test]
    fn test_optimize_images_is_idempotent() {
        let html = r#"<img src="a.jpg"><p>x</p><img src="b.jpg" alt="" /><img loading="lazy" src="c.jpg">"#;
        let once = optimize_images(html);
        assert_eq!(optimize_images(&once), once);
        assert_eq!(once.matches("loading=").count(), 3);
        assert_eq!(once.matches("decoding=").count(), 3);
    }

    #[test]
    fn test_instrument_headings() {
        let html = "<h2>Istoric</h2>\n<p>a</p>\n<h2 class=\"big\">Unde <em>mâncăm</em>?</h2>\n<h2>Program &amp; prețuri</h2>";
        let (out, toc) = instrument_headings(html);

        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0], TocEntry { id: "heading-1-istoric".to_string(), text: "Istoric".to_string(), level: 2 });
        assert_eq!(toc[1].id, "heading-2-unde-mncm");
        assert_eq!(toc[1].text, "Unde mâncăm?");
        assert_eq!(toc[2].id, "heading-3-program-amp-preuri");

        assert!(out.contains("<h2 id=\"heading-1-istoric\">Istoric</h2>"));
        assert!(out.contains("<h2 class=\"big\" id=\"heading-2-unde-mncm\">Unde <em>mâncăm</em>?</h2>"));
    }

    #[test]
    fn test_existing_id_is_replaced() {
        let (out, toc) = instrument_headings("<h2 id=\"old\" class=\"x\">Nou</h2><h2 data-id=\"keep\">Doi</h2>");
        assert_eq!(toc[0].id, "heading-1-nou");
        assert!(out.contains("<h2 id=\"heading-1-nou\" class=\"x\">Nou</h2>"));
        assert!(out.contains("<h2 data-id=\"keep\" id=\"heading-2-doi\">Doi</h2>"));
    }

    #[test]
    fn test_empty_headings_are_skipped_but_counted() {
        let html = "<h2><img src=\"a.jpg\"></h2><h2>\n  Multi\n  line\n</h2><h3>Not me</h3>";
        let (out, toc) = instrument_headings(html);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "heading-2-multi-line");
        assert_eq!(toc[0].text, "Multi\n  line");
        assert!(out.starts_with("<h2><img src=\"a.jpg\"></h2>"));
        assert!(out.contains("<h3>Not me</h3>"));
    }
}
