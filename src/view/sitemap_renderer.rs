use std::collections::BTreeMap;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::Post;
use crate::corpus::{city_of, country_of, Corpus};
use crate::includes::url_encode;
use crate::locale::Locale;
use crate::text_utils::{format_date, normalize_location, parse_date};

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.ro/ro</loc>
    <lastmod>2024-06-01</lastmod>
    <changefreq>daily</changefreq>
    <priority>1.0</priority>
  </url>
</urlset>
*/

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: f32,
}

pub struct Sitemap<'a> {
    pub site_url: &'a str,
    pub default_locale: Locale,
}

impl<'a> Sitemap<'a> {
    /// Every page of the site: home, static pages, posts, then the country
    /// and city listings. A locale other than the default one is left out
    /// when it has no posts.
    pub fn entries<'c, I>(&self, corpora: I, today: &str) -> Vec<SitemapEntry>
    where
        I: IntoIterator<Item=&'c Corpus>,
    {
        let mut entries = vec![];
        let base = self.site_url.trim_end_matches('/');
        let mut add = |path: String, lastmod: String, changefreq: &'static str, priority: f32| {
            entries.push(SitemapEntry {
                loc: format!("{}{}", base, path),
                lastmod,
                changefreq,
                priority,
            });
        };

        for corpus in corpora {
            let locale = corpus.locale();
            if locale != self.default_locale && corpus.is_empty() {
                continue;
            }

            let home_priority = if locale == self.default_locale { 1.0 } else { 0.9 };
            add(format!("/{}", locale), today.to_string(), "daily", home_priority);
            add(format!("/{}/about", locale), today.to_string(), "monthly", 0.7);
            add(format!("/{}/contact", locale), today.to_string(), "monthly", 0.7);
            add(format!("/{}/destinations", locale), today.to_string(), "daily", 0.8);

            for post in corpus.posts() {
                let lastmod = last_modified(post).unwrap_or_else(|| today.to_string());
                add(format!("/{}/{}", locale, post.slug()), lastmod, "weekly", 0.7);
            }

            let countries = newest_by_location(corpus.posts(), country_of);
            let cities = newest_by_location(corpus.posts(), |post| city_of(post, locale));
            for (name, newest) in countries.into_iter().chain(cities) {
                let lastmod = newest.unwrap_or_else(|| today.to_string());
                add(format!("/{}/location/{}", locale, location_slug(&name)), lastmod, "weekly", 0.6);
            }
        }

        entries
    }

    pub fn render<'c, I>(&self, corpora: I, today: &str) -> quick_xml::Result<Vec<u8>>
    where
        I: IntoIterator<Item=&'c Corpus>,
    {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8"?>
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        // <urlset xmlns="...">
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for entry in self.entries(corpora, today) {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            push_text(&mut writer, "loc", &entry.loc)?;
            push_text(&mut writer, "lastmod", &entry.lastmod)?;
            push_text(&mut writer, "changefreq", entry.changefreq)?;
            push_text(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        // </urlset>
        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        Ok(writer.into_inner().into_inner())
    }
}

/// `date-modified` when it parses, otherwise the post date.
fn last_modified(post: &Post) -> Option<String> {
    post.front_matter.text("date-modified")
        .and_then(|d| parse_date(&d).ok())
        .map(|d| format_date(&d))
        .or_else(|| parse_date(&post.front_matter.date).ok().map(|d| format_date(&d)))
}

/// Normalized location names with the date of their newest post.
fn newest_by_location<F>(posts: &[Post], location_of: F) -> BTreeMap<String, Option<String>>
where
    F: Fn(&Post) -> Option<String>,
{
    let mut locations: BTreeMap<String, Option<String>> = BTreeMap::new();
    for post in posts {
        let name = match location_of(post).map(|l| normalize_location(&l)) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        let date = last_modified(post);
        let newest = locations.entry(name).or_insert(None);
        if date > *newest {
            *newest = date;
        }
    }
    locations
}

fn location_slug(name: &str) -> String {
    url_encode(&name.to_lowercase()).replace('+', "%20")
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
