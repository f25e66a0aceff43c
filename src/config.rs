use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::corpus::DEFAULT_RELATED_LIMIT;
use crate::locale::Locale;

pub const CFG_FILE_NAME: &str = "calatorii.toml";

#[derive(Deserialize)]
pub struct Site {
    pub url: String,
    #[serde(default)]
    pub default_locale: Locale,
    #[serde(default = "all_locales")]
    pub locales: Vec<Locale>,
}

#[derive(Deserialize)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub public_dir: PathBuf,
    pub template_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    #[serde(default = "default_related_limit")]
    pub related_posts_limit: usize,
    #[serde(default)]
    pub rendering_cache_enabled: bool,
    pub cache_ttl_secs: Option<i64>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
}

fn all_locales() -> Vec<Locale> {
    Locale::ALL.to_vec()
}

fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

fn exe_dir() -> io::Result<PathBuf> {
    let cur_exe = env::current_exe()?;
    match cur_exe.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(io::Error::new(ErrorKind::NotFound, "Executable has no parent directory")),
    }
}

/// Expands a leading `${exe_dir}` to the directory of the running binary.
fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }
    let exe_dir = exe_dir()?;
    let str_path = path.to_string_lossy();
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.site.locales.is_empty() {
        cfg.site.locales = all_locales();
    }
    if !cfg.site.locales.contains(&cfg.site.default_locale) {
        cfg.site.locales.insert(0, cfg.site.default_locale);
    }

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        template_dir: parse_path(cfg.paths.template_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };
    parse_config(&cfg_content)
}

/// `calatorii.toml` next to the executable, in the current directory or in
/// the user config directory, in that order.
pub fn find_config() -> Option<PathBuf> {
    let mut candidates = vec![];
    if let Ok(dir) = exe_dir() {
        candidates.push(dir.join(CFG_FILE_NAME));
    }
    if let Ok(dir) = env::current_dir() {
        candidates.push(dir.join(CFG_FILE_NAME));
    }
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(CFG_FILE_NAME));
    }

    candidates.into_iter().find(|path| path.exists())
}
