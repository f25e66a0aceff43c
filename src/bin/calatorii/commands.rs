use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use spdlog::info;

use calatorii::config::Config;
use calatorii::corpus::{Corpus, ContentStore};
use calatorii::locale::Locale;
use calatorii::pages::{build_site, render_sitemap};
use calatorii::server::server_run;

pub(crate) async fn serve_cmd(config: Config) -> Result<()> {
    server_run(config).await?;
    Ok(())
}

fn store(config: &Config) -> ContentStore {
    let mut store = ContentStore::new(config.paths.content_dir.clone(), config.paths.public_dir.clone());
    store.related_limit = config.defaults.related_posts_limit;
    store
}

pub(crate) fn list_cmd(config: &Config, locale: Locale) -> Result<()> {
    for post in store(config).all_posts(locale) {
        println!("{}\t{}\t{}", post.front_matter.date, post.slug(), post.front_matter.title);
    }
    Ok(())
}

pub(crate) fn render_cmd(config: &Config, locale: Locale, slug: &str, toc: bool) -> Result<()> {
    let post = match store(config).post_by_slug(slug, locale) {
        Some(post) => post,
        None => return Err(anyhow!("No post {} in locale {}", slug, locale)),
    };

    if toc {
        println!("{}", serde_json::to_string_pretty(&post.table_of_contents)?);
    } else {
        println!("{}", post.html_content);
    }
    Ok(())
}

pub(crate) fn sitemap_cmd(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let corpora: Vec<Corpus> = config.site.locales.iter()
        .map(|locale| Corpus::build(&config.paths.content_dir, *locale))
        .collect();
    let xml = render_sitemap(config, &corpora)?;

    match output {
        Some(path) => {
            fs::write(&path, xml)?;
            info!("Sitemap written to {}", path.display());
        }
        None => println!("{}", String::from_utf8_lossy(&xml)),
    }
    Ok(())
}

pub(crate) fn build_cmd(config: &Config, out_dir: &Path) -> Result<()> {
    let written = build_site(config, out_dir)?;
    info!("{} posts written to {}", written, out_dir.display());
    Ok(())
}
