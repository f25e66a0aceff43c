use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use spdlog::debug;

use crate::corpus::Corpus;
use crate::locale::Locale;

pub enum Expire {
    Never,
    After(Duration),
}

struct CacheValue {
    expire_date: DateTime<Utc>,
    value: Arc<Corpus>,
}

/// One corpus per locale, rebuilt once the entry expires. A non caching
/// instance reads the content tree on every call.
pub struct CorpusCache {
    content_dir: PathBuf,
    expire_after: Option<Duration>,
    cache: Option<RwLock<HashMap<Locale, CacheValue>>>,
}

impl CorpusCache {
    pub fn new(content_dir: PathBuf, expire: Expire) -> Self {
        let expire_after = match expire {
            Expire::Never => None,
            Expire::After(duration) => Some(duration),
        };
        CorpusCache {
            content_dir,
            expire_after,
            cache: Some(RwLock::new(HashMap::new())),
        }
    }

    pub fn non_caching(content_dir: PathBuf) -> Self {
        CorpusCache {
            content_dir,
            expire_after: None,
            cache: None,
        }
    }

    pub fn get(&self, locale: Locale) -> Arc<Corpus> {
        let cache = match self.cache {
            Some(ref cache) => cache,
            None => return Arc::new(Corpus::build(&self.content_dir, locale)),
        };

        if let Ok(reader) = cache.read() {
            if let Some(cache_value) = reader.get(&locale) {
                if Utc::now() <= cache_value.expire_date {
                    return cache_value.value.clone();
                }
            }
        }

        debug!("Building corpus for {}", locale);
        let value = Arc::new(Corpus::build(&self.content_dir, locale));
        let expire_date = match self.expire_after {
            None => DateTime::<Utc>::MAX_UTC,
            Some(duration) => Utc::now() + duration,
        };

        // a poisoned lock only costs the cache entry
        if let Ok(mut writer) = cache.write() {
            writer.insert(locale, CacheValue {
                expire_date,
                value: value.clone(),
            });
        }
        value
    }

    pub fn clear(&self) {
        if let Some(ref cache) = self.cache {
            if let Ok(mut writer) = cache.write() {
                writer.clear();
            }
        }
    }
}
