use lazy_static::lazy_static;
use regex::Regex;

use crate::content::front_matter::DEFAULT_IMAGE;
use crate::includes::{render_template, IncludeContext};
use crate::text_utils::collapse_whitespace;

const INTRO_LIMIT: usize = 1000;
// a sentence end past this index is a good place to cut
const SENTENCE_CUT_FROM: usize = 800;
// heading number of an attraction without `position`
const UNPOSITIONED_NUMBER: i64 = 999;
const INTRO_KEYS: [&str; 4] = ["text-intro", "descriere", "description", "excerpt"];
const PARAGRAPH_OPEN: &str = r#"<p class="text-foreground text-[15px] sm:text-[17px] leading-relaxed mb-4 sm:mb-6">"#;

lazy_static! {
    static ref HR_TAG: Regex = Regex::new(r"(?i)<hr\s*/?>").unwrap();
}

const PLACES_TPL: &str = r#"{{#places}}
<h2 class="text-xl sm:text-2xl font-bold mb-3 sm:mb-4 mt-6 sm:mt-10 pb-2 text-foreground">{{number}}. {{title}}</h2>
<img src="{{image}}" alt="{{title}}" class="rounded-xl shadow-lg my-6 sm:my-8 w-full h-auto max-w-full" loading="lazy" />
{{{intro}}}
<p class="mb-8 pb-8 border-b border-border">
<a href="{{href}}" class="text-primary font-medium no-underline hover:underline break-words inline-flex items-center gap-2">{{link_text}}
<svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5l7 7-7 7" /></svg>
</a>
</p>
{{/places}}"#;

#[derive(ramhorns::Content)]
struct PlacesToVisit {
    places: Vec<Place>,
}

#[derive(ramhorns::Content)]
struct Place {
    number: i64,
    title: String,
    image: String,
    intro: String,
    href: String,
    link_text: &'static str,
}

/// The first `no-atractii` attractions of the city, for a `blog-oras` post.
pub fn render(ctx: &IncludeContext) -> String {
    let fm = ctx.front_matter;
    if fm.text("cat").as_deref() != Some("blog-oras") {
        return String::new();
    }
    let (city_id, count) = match (fm.text("id-oras"), fm.int("no-atractii")) {
        (Some(city_id), Some(count)) if count > 0 => (city_id, count as usize),
        _ => return String::new(),
    };

    let locale = ctx.locale;
    let places: Vec<Place> = ctx.corpus.attractions_of(&city_id)
        .into_iter()
        .take(count)
        .map(|attraction| {
            let afm = &attraction.front_matter;
            let image = if afm.featured_image.is_empty() { DEFAULT_IMAGE.to_string() } else { afm.featured_image.clone() };
            Place {
                number: afm.int("position").unwrap_or(UNPOSITIONED_NUMBER),
                title: afm.first_text(&["atractie", "title"]).unwrap_or_default(),
                image,
                intro: afm.first_text(&INTRO_KEYS).map(|raw| intro_paragraph(&raw)).unwrap_or_default(),
                href: format!("/{}/{}", locale, afm.slug),
                link_text: locale.pick("Citește articolul complet", "Read full article"),
            }
        })
        .collect();

    if places.is_empty() {
        return String::new();
    }

    render_template("places to visit", PLACES_TPL, &PlacesToVisit { places })
}

/// Turns an intro field into paragraphs, capped at 1000 characters and cut
/// at a sentence end when one is close to the limit.
pub fn intro_paragraph(raw: &str) -> String {
    let paragraph_break = format!("</p>{}", PARAGRAPH_OPEN);
    let text = HR_TAG.replace_all(raw, paragraph_break.as_str());
    let text = collapse_whitespace(&text);
    if text.is_empty() {
        return text;
    }

    let mut intro = if text.starts_with("<p") { text } else { format!("{}{}", PARAGRAPH_OPEN, text) };
    if !intro.ends_with("</p>") {
        intro.push_str("</p>");
    }

    let chars: Vec<char> = intro.chars().collect();
    if chars.len() <= INTRO_LIMIT {
        return intro;
    }

    let truncated = &chars[..INTRO_LIMIT];
    match truncated.iter().rposition(|c| *c == '.') {
        Some(last_period) if last_period > SENTENCE_CUT_FROM => {
            let cut: String = truncated[..=last_period].iter().collect();
            format!("{}</p>", cut)
        }
        _ => {
            let cut: String = truncated.iter().collect();
            format!("{}...</p>", cut.trim())
        }
    }
}
