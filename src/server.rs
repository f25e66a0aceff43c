use std::io;
use std::sync::Arc;

use chrono::Duration;
use ntex::web;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::content_cache::{CorpusCache, Expire};
use crate::corpus::Corpus;
use crate::locale::Locale;
use crate::pages::{load_template, render_post_list, render_post_page, render_sitemap, LIST_TEMPLATE, POST_TEMPLATE};

struct AppState {
    corpora: CorpusCache,
    post_tpl: String,
    list_tpl: String,
    config: Config,
}

impl AppState {
    /// The corpus of a configured locale.
    fn corpus(&self, locale: &str) -> Option<(Locale, Arc<Corpus>)> {
        let locale = locale.parse::<Locale>().ok()?;
        if !self.config.site.locales.contains(&locale) {
            return None;
        }
        Some((locale, self.corpora.get(locale)))
    }

    fn sitemap_xml(&self) -> io::Result<Vec<u8>> {
        let corpora: Vec<Arc<Corpus>> = self.config.site.locales.iter()
            .map(|locale| self.corpora.get(*locale))
            .collect();
        render_sitemap(&self.config, corpora.iter().map(|corpus| corpus.as_ref()))
    }
}

fn html(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body("Not found")
}

// Begin: Redirect region --------
#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", format!("/{}/", state.config.site.default_locale))
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/{locale}")]
async fn locale_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", format!("/{}/", path.into_inner()))
        .content_type("text/html; charset=utf-8")
        .finish()
}
// End: Redirect region --------

#[web::get("/sitemap.xml")]
async fn sitemap(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match state.sitemap_xml() {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/xml; charset=utf-8")
            .body(xml),
        Err(e) => {
            error!("{}", e);
            web::HttpResponse::InternalServerError().body(format!("Error rendering sitemap: {}", e))
        }
    }
}

#[web::get("/images/{path}*")]
async fn images(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join("images").join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

#[web::get("/{locale}/")]
async fn list(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let (locale, corpus) = match state.corpus(&path.into_inner()) {
        Some(found) => found,
        None => return not_found(),
    };

    let heading = locale.pick("Articole", "Posts");
    match render_post_list(corpus.posts(), heading, locale, &state.list_tpl) {
        Ok(body) => html(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing posts: {}", e)),
    }
}

#[web::get("/{locale}/location/{name}")]
async fn location(path: web::types::Path<(String, String)>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let (locale, name) = path.into_inner();
    let (locale, corpus) = match state.corpus(&locale) {
        Some(found) => found,
        None => return not_found(),
    };

    let posts = corpus.by_location(&name);
    match render_post_list(posts, &name, locale, &state.list_tpl) {
        Ok(body) => html(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing posts of {}: {}", name, e)),
    }
}

#[web::get("/{locale}/{slug}")]
async fn view(path: web::types::Path<(String, String)>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let (locale, slug) = path.into_inner();
    let (_, corpus) = match state.corpus(&locale) {
        Some(found) => found,
        None => return not_found(),
    };

    let page = render_post_page(&corpus, &slug, &state.config.paths.public_dir,
                                state.config.defaults.related_posts_limit, &state.post_tpl);
    match page {
        Ok(Some(body)) => html(body),
        Ok(None) => not_found(),
        Err(e) => web::HttpResponse::BadRequest()
            .body(format!("Error loading post {}: {}", slug, e)),
    }
}

fn corpus_cache(config: &Config) -> CorpusCache {
    let content_dir = config.paths.content_dir.clone();
    if !config.defaults.rendering_cache_enabled {
        return CorpusCache::non_caching(content_dir);
    }
    let expire = match config.defaults.cache_ttl_secs {
        Some(secs) if secs > 0 => Expire::After(Duration::seconds(secs)),
        _ => Expire::Never,
    };
    CorpusCache::new(content_dir, expire)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let post_tpl = load_template(&config.paths.template_dir, POST_TEMPLATE)?;
    let list_tpl = load_template(&config.paths.template_dir, LIST_TEMPLATE)?;

    for locale in config.site.locales.iter() {
        info!("Serving /{}/ from {}", locale, config.paths.content_dir.join(locale.as_str()).display());
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        corpora: corpus_cache(&config),
        post_tpl,
        list_tpl,
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(sitemap)
            .service(images)
            .service(locale_wo_slash)
            .service(list)
            .service(location)
            .service(view)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
