use lazy_static::lazy_static;
use regex::Regex;

use crate::includes::{render_template, url_encode, IncludeContext};

lazy_static! {
    static ref URL_SCHEME: Regex = Regex::new(r"^https?://").unwrap();
}

const WEBSITE_ICON: &str = r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M21 12a9 9 0 01-9 9m9-9a9 9 0 00-9-9m9 9H3m9 9a9 9 0 01-9-9m9 9c1.657 0 3-4.03 3-9s-1.343-9-3-9m0 18c-1.657 0-3-4.03-3-9s1.343-9 3-9m-9 9a9 9 0 019-9" />"#;
const PHONE_ICON: &str = r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 5a2 2 0 012-2h3.28a1 1 0 01.948.684l1.498 4.493a1 1 0 01-.502 1.21l-2.257 1.13a11.042 11.042 0 005.516 5.516l1.13-2.257a1 1 0 011.21-.502l4.493 1.498a1 1 0 01.684.949V19a2 2 0 01-2 2h-1C9.716 21 3 14.284 3 6V5z" />"#;
const EMAIL_ICON: &str = r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z" />"#;
const ADDRESS_ICON: &str = r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.827 0l-4.244-4.243a8 8 0 1111.314 0z" /><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M15 11a3 3 0 11-6 0 3 3 0 016 0z" />"#;

const CONTACT_TPL: &str = r#"<div class="my-3 mb-3 sm:my-4">
<div class="{{grid_class}}">
{{#cards}}<div class="{{#wide}}sm:col-span-2 {{/wide}}bg-card border border-border rounded-lg p-4 hover:shadow-md transition-shadow">
<div class="flex items-start gap-3">
<div class="flex-shrink-0 w-10 h-10 min-w-[2.5rem] min-h-[2.5rem] aspect-square bg-primary/10 dark:bg-primary/5 rounded-full flex items-center justify-center">
<svg class="w-5 h-5 text-primary dark:text-primary-400" fill="none" stroke="currentColor" viewBox="0 0 24 24">{{{icon}}}</svg>
</div>
<div class="flex-1 min-w-0">
<div class="text-xs font-medium text-muted-foreground mb-1">{{label}}</div>
<a href="{{href}}"{{#new_tab}} target="_blank" rel="noopener noreferrer"{{/new_tab}} class="{{link_class}}">{{text}}</a>
{{#map_link}}<a href="{{href}}" target="_blank" rel="noopener noreferrer" class="inline-flex items-center gap-1 text-xs text-primary hover:underline mt-1"><svg class="w-3 h-3" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 6H6a2 2 0 00-2 2v10a2 2 0 002 2h10a2 2 0 002-2v-4M14 4h6m0 0v6m0-6L10 14" /></svg>{{label}}</a>{{/map_link}}
</div>
</div>
</div>
{{/cards}}</div>
</div>
"#;

#[derive(ramhorns::Content)]
struct ContactBox {
    grid_class: &'static str,
    cards: Vec<Card>,
}

#[derive(ramhorns::Content)]
struct Card {
    wide: bool,
    icon: &'static str,
    label: &'static str,
    href: String,
    new_tab: bool,
    link_class: &'static str,
    text: String,
    map_link: Option<MapLink>,
}

#[derive(ramhorns::Content)]
struct MapLink {
    href: String,
    label: &'static str,
}

/// Cards for the website, phone, email and address fields that are present.
pub fn render(ctx: &IncludeContext) -> String {
    let fm = ctx.front_matter;
    let locale = ctx.locale;
    let mut cards = vec![];

    if let Some(website) = fm.text("website") {
        let display = URL_SCHEME.replace(&website, "");
        let display = display.strip_suffix('/').unwrap_or(&display).to_string();
        cards.push(Card {
            wide: false,
            icon: WEBSITE_ICON,
            label: "Website",
            href: website,
            new_tab: true,
            link_class: "text-sm text-primary hover:underline break-all",
            text: display,
            map_link: None,
        });
    }

    if let Some(phone) = fm.text("phone") {
        cards.push(Card {
            wide: false,
            icon: PHONE_ICON,
            label: locale.pick("Telefon", "Phone"),
            href: format!("tel:{}", phone),
            new_tab: false,
            link_class: "text-sm text-foreground hover:text-primary transition-colors",
            text: phone,
            map_link: None,
        });
    }

    if let Some(email) = fm.text("email") {
        cards.push(Card {
            wide: false,
            icon: EMAIL_ICON,
            label: "Email",
            href: format!("mailto:{}", email),
            new_tab: false,
            link_class: "text-sm text-foreground hover:text-primary transition-colors break-all",
            text: email,
            map_link: None,
        });
    }

    if let Some(address) = fm.text("adresa") {
        let maps_url = match (fm.text("latitudine"), fm.text("longitudine")) {
            (Some(lat), Some(lng)) => format!("https://www.google.com/maps?q={},{}", lat, lng),
            _ => format!("https://www.google.com/maps/search/?api=1&query={}", url_encode(&address)),
        };
        cards.push(Card {
            wide: false,
            icon: ADDRESS_ICON,
            label: locale.pick("Adresă", "Address"),
            href: maps_url.clone(),
            new_tab: true,
            link_class: "text-sm text-foreground hover:text-primary transition-colors block",
            text: address,
            map_link: Some(MapLink {
                href: maps_url,
                label: locale.pick("Deschide în Google Maps", "Open in Google Maps"),
            }),
        });
    }

    if cards.is_empty() {
        return String::new();
    }

    // an odd last card spans both columns
    let count = cards.len();
    if count > 1 && count % 2 == 1 {
        if let Some(last) = cards.last_mut() {
            last.wide = true;
        }
    }

    let grid_class = if count == 1 {
        "grid grid-cols-1 gap-4"
    } else {
        "grid grid-cols-1 sm:grid-cols-2 gap-4"
    };

    render_template("contact box", CONTACT_TPL, &ContactBox {
        grid_class,
        cards,
    })
}

#[cfg(test)]
mod tests {
    use crate::corpus::Corpus;
    use crate::includes::tests::render_for;
    use crate::includes::Include;
    use crate::locale::Locale;

    fn render(yaml: &str, locale: Locale) -> String {
        let corpus = Corpus::from_posts(locale, vec![]);
        render_for(Include::ContactBox, yaml, locale, &corpus)
    }

    #[test]
    fn test_no_contact_fields() {
        assert_eq!(render("title: Bran", Locale::Ro), "");
        assert_eq!(render("latitudine: 45.5\nlongitudine: 25.3", Locale::Ro), "");
    }

    #[test]
    fn test_single_card() {
        let html = render("website: https://bran-castle.com/", Locale::Ro);
        assert!(html.starts_with("<div class=\"my-3 mb-3 sm:my-4\">"));
        assert!(html.contains("<div class=\"grid grid-cols-1 gap-4\">"));
        assert!(html.contains(">bran-castle.com</a>"));
        assert!(html.contains("href=\"https://bran-castle.com/\" target=\"_blank\""));
        assert!(!html.contains("sm:col-span-2"));
    }

    #[test]
    fn test_odd_count_widens_last_card() {
        let html = render("website: http://a.ro\nphone: '0268 237 700'\nemail: info@a.ro", Locale::En);
        assert!(html.contains("grid grid-cols-1 sm:grid-cols-2 gap-4"));
        assert_eq!(html.matches("sm:col-span-2").count(), 1);
        let wide_at = html.find("sm:col-span-2").unwrap();
        assert!(wide_at > html.find("tel:0268 237 700").unwrap());
        assert!(html.contains("mailto:info@a.ro"));
        assert!(html.contains(">Phone</div>"));
    }

    #[test]
    fn test_even_count() {
        let html = render("phone: '123'\nemail: x@y.z", Locale::Ro);
        assert!(!html.contains("sm:col-span-2"));
        assert!(html.contains(">Telefon</div>"));
    }

    #[test]
    fn test_address_map_link() {
        let html = render("adresa: Piața Mare 5\nlatitudine: 45.7969\nlongitudine: 24.1522", Locale::Ro);
        assert_eq!(html.matches("https://www.google.com/maps?q=45.7969,24.1522").count(), 2);
        assert!(html.contains("Deschide în Google Maps"));

        let html = render("adresa: Piața Mare 5\nlatitudine: 45.7969", Locale::En);
        assert!(html.contains("query=Pia%C8%9Ba+Mare+5"));
        assert!(html.contains("Open in Google Maps"));
    }
}
