use crate::corpus::anchors_of;
use crate::includes::{render_template, url_encode, IncludeContext};
use crate::text_utils::hyphenate;

const BACKLINK_TPL: &str = r#"<div class="my-6 sm:my-8 relative not-prose">
<div class="flex items-center gap-3 p-4 sm:p-5 bg-card border-l-4 border-primary rounded-r-lg shadow-sm hover:shadow-md transition-all duration-300 group">
<div class="flex-shrink-0 w-10 h-10 min-w-[2.5rem] min-h-[2.5rem] aspect-square bg-primary/10 dark:bg-primary/5 rounded-full flex items-center justify-center">
<svg class="w-5 h-5 text-primary dark:text-primary-400" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 12h6m-6 4h6m2 5H7a2 2 0 01-2-2V5a2 2 0 012-2h5.586a1 1 0 01.707.293l5.414 5.414a1 1 0 01.293.707V19a2 2 0 01-2 2z" /></svg>
</div>
<div class="flex-1 min-w-0 flex items-center gap-2">
<span class="text-sm font-medium text-muted-foreground">{{label}}</span>
<a href="{{href}}" class="text-base font-bold text-foreground hover:text-primary transition-colors">{{anchor}}</a>
</div>
<div class="flex-shrink-0">
<svg class="w-5 h-5 text-primary transform group-hover:translate-x-1 transition-transform" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 7l5 5m0 0l-5 5m5-5H6" /></svg>
</div>
</div>
</div>
"#;

#[derive(ramhorns::Content)]
struct Backlink<'a> {
    label: &'a str,
    href: String,
    anchor: &'a str,
}

/// Rolling hash over the UTF-16 code units of `text`: `h * 31 + c` on 32 bits,
/// rotated left by one bit after every step.
pub fn anchor_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(31).wrapping_add(unit as i32).rotate_left(1)
    })
}

/// Index of the anchor a post links with. Stable for a given post.
pub fn anchor_index(slug: &str, title: &str, date: &str, anchor_count: usize) -> usize {
    if anchor_count == 0 {
        return 0;
    }
    let hash = anchor_hash(&format!("{}-{}-{}", slug, title, date));
    (hash as i64).unsigned_abs() as usize % anchor_count
}

/// "See also" link to one anchor of the city's landing page.
pub fn render(ctx: &IncludeContext) -> String {
    let fm = ctx.front_matter;
    let city_id = match fm.first_text(&["id-oras", "idOras"]) {
        Some(city_id) => city_id,
        None => return String::new(),
    };

    let landing = match ctx.corpus.landing_of(&city_id) {
        Some(landing) => landing,
        None => return String::new(),
    };

    let anchors = anchors_of(landing);
    let index = anchor_index(&fm.slug, &fm.title, &fm.date, anchors.len());
    let anchor = match anchors.get(index) {
        Some(anchor) => anchor,
        None => return String::new(),
    };

    let locale = ctx.locale;
    render_template("backlink", BACKLINK_TPL, &Backlink {
        label: locale.pick("Vezi și:", "See also:"),
        href: format!("/{}/{}#{}", locale, landing.slug(), url_encode(&hyphenate(anchor))),
        anchor,
    })
}

#[cfg(test)]
mod tests {
    use crate::corpus::Corpus;
    use crate::includes::tests::{post, render_for};
    use crate::includes::Include;
    use crate::locale::Locale;

    use super::*;

    fn corpus() -> Corpus {
        Corpus::from_posts(Locale::Ro, vec![
            post("subcat: lv\nid-oras: 12\nanchors: []\ndate: 2024-05-01", "empty-lv.md", Locale::Ro),
            post("subcat: lv\nid-oras: 12\nanchors: [A, B, C]\ndate: 2024-04-01", "sibiu-lv.md", Locale::Ro),
            post("subcat: lv\nidOras: 7\nanchors: [Castelul Bran]\ndate: 2024-03-01", "bran-lv.md", Locale::Ro),
        ])
    }

    #[test]
    fn test_anchor_hash() {
        assert_eq!(anchor_hash(""), 0);
        assert_eq!(anchor_hash("a"), 194);
        assert_eq!(anchor_hash("ab"), 12224);
    }

    #[test]
    fn test_anchor_index_is_stable() {
        for count in 1..6 {
            let first = anchor_index("muzeul-brukenthal", "Muzeul Brukenthal", "2024-03-15", count);
            let second = anchor_index("muzeul-brukenthal", "Muzeul Brukenthal", "2024-03-15", count);
            assert_eq!(first, second);
            assert!(first < count);
        }
        assert_eq!(anchor_index("a", "b", "c", 0), 0);
    }

    #[test]
    fn test_stable_across_renders() {
        let corpus = corpus();
        let yaml = "title: Turnul Sfatului\nid-oras: 12\ndate: 2024-02-02";
        let first = render_for(Include::Backlink, yaml, Locale::Ro, &corpus);
        let second = render_for(Include::Backlink, yaml, Locale::Ro, &corpus);
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert!(first.contains("Vezi și:"));

        let index = anchor_index("current", "Turnul Sfatului", "2024-02-02", 3);
        let anchor = ["A", "B", "C"][index];
        assert!(first.contains(&format!("href=\"/ro/sibiu-lv#{}\"", anchor.to_lowercase())));
        assert!(first.contains(&format!(">{}</a>", anchor)));
    }

    #[test]
    fn test_fragment_is_encoded() {
        let corpus = corpus();
        let html = render_for(Include::Backlink, "title: x\nidOras: 7", Locale::En, &corpus);
        assert!(html.contains("href=\"/en/bran-lv#castelul-bran\""));
        assert!(html.contains("See also:"));
    }

    #[test]
    fn test_no_landing_page() {
        let corpus = corpus();
        assert_eq!(render_for(Include::Backlink, "title: x", Locale::Ro, &corpus), "");
        assert_eq!(render_for(Include::Backlink, "title: x\nid-oras: 99", Locale::Ro, &corpus), "");
    }
}
