use std::fs;
use std::path::Path;

use serde::Serialize;
use spdlog::{error, warn};

use crate::includes::{render_template, IncludeContext};

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "avif"];
const VISIBLE_TILES: usize = 6;

const GALLERY_TPL: &str = r#"<div class="my-8 sm:my-12 gallery-container" data-gallery-init data-images='{{{images_json}}}' data-total="{{total}}">
<h2 class="text-2xl sm:text-3xl font-bold mb-6 text-foreground">{{title}}</h2>
<div class="grid grid-cols-2 sm:grid-cols-3 gap-3">
{{#visible}}{{#see_more}}<div class="group relative overflow-hidden rounded-lg bg-muted cursor-pointer gallery-see-more-btn" data-visible-count="{{visible_count}}" style="aspect-ratio: 1 / 1; min-height: 0;">
<img src="{{path}}" alt="{{alt}}" class="absolute inset-0 w-full h-full blur-sm transition-transform duration-500" loading="lazy" style="object-fit: cover; width: 100%; height: 100%; margin-top: 0;" />
<div class="absolute inset-0 bg-black/50 flex items-center justify-center"><div class="text-center text-white">
<div class="font-bold text-base sm:text-lg">{{see_more_label}}</div>
<div class="text-sm sm:text-base opacity-90">+{{remaining}}</div>
</div></div></div>
{{/see_more}}{{^see_more}}<div class="group relative overflow-hidden rounded-lg bg-muted cursor-pointer gallery-image" data-index="{{index}}" style="aspect-ratio: 1 / 1; min-height: 0;">
<img src="{{path}}" alt="{{alt}}" class="absolute inset-0 w-full h-full transition-transform duration-500 group-hover:scale-110" loading="lazy" style="object-fit: cover; width: 100%; height: 100%; margin-top: 0;" />
<div class="absolute inset-0 bg-black/0 group-hover:bg-black/20 transition-colors duration-300"></div>
</div>
{{/see_more}}{{/visible}}</div>
{{#has_more}}<div class="grid grid-cols-2 sm:grid-cols-3 gap-3 mt-6 gallery-more" style="display: none;">
{{#more}}<div class="group relative overflow-hidden rounded-lg bg-muted cursor-pointer gallery-image" data-index="{{index}}" style="aspect-ratio: 1 / 1; min-height: 0;">
<img src="{{path}}" alt="{{alt}}" class="absolute inset-0 w-full h-full transition-transform duration-500 group-hover:scale-110" loading="lazy" style="object-fit: cover; width: 100%; height: 100%; margin-top: 0;" />
<div class="absolute inset-0 bg-black/0 group-hover:bg-black/20 transition-colors duration-300"></div>
</div>
{{/more}}</div>
{{/has_more}}</div>
"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryImage {
    pub name: String,
    pub path: String,
    pub alt: String,
}

#[derive(ramhorns::Content)]
struct Gallery<'a> {
    images_json: String,
    total: usize,
    title: &'a str,
    visible: Vec<Tile<'a>>,
    has_more: bool,
    more: Vec<Tile<'a>>,
}

#[derive(ramhorns::Content)]
struct Tile<'a> {
    index: usize,
    path: &'a str,
    alt: &'a str,
    see_more: bool,
    see_more_label: &'a str,
    visible_count: usize,
    remaining: usize,
}

/// Images of `{public_dir}/images/travel/{folder}/galerie`, by file name.
/// A missing directory has no images.
pub fn list_gallery_images(public_dir: &Path, folder: &str, title: &str) -> Vec<GalleryImage> {
    let gallery_dir = public_dir.join("images").join("travel").join(folder).join("galerie");
    let entries = match fs::read_dir(&gallery_dir) {
        Ok(entries) => entries,
        Err(_) => return vec![],
    };

    let alt_prefix = if title.is_empty() { "Image" } else { title };
    let mut images = vec![];
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable gallery entry in {}: {}", gallery_dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        let is_image = path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if !is_image || !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        images.push(GalleryImage {
            path: format!("/images/travel/{}/galerie/{}", folder, name),
            alt: format!("{} - {}", alt_prefix, stem),
            name,
        });
    }

    images.sort_by(|a, b| a.name.cmp(&b.name));
    images
}

pub fn render(ctx: &IncludeContext) -> String {
    let fm = ctx.front_matter;
    let folder = match fm.text("folder") {
        Some(folder) => folder,
        None => return String::new(),
    };

    let images = list_gallery_images(ctx.public_dir, &folder, &fm.title);
    if images.is_empty() {
        return String::new();
    }

    // the attribute is single-quoted
    let images_json = match serde_json::to_string(&images) {
        Ok(json) => json.replace('"', "&quot;").replace('\'', "&#39;"),
        Err(e) => {
            error!("Error serializing gallery of {}: {}", fm.slug, e);
            return String::new();
        }
    };

    let locale = ctx.locale;
    let see_more_label = locale.pick("Vezi", "See");
    let visible_count = images.len().min(VISIBLE_TILES);
    let remaining = images.len() - visible_count;

    let mut visible = tiles(&images[..visible_count], 0, see_more_label, visible_count, remaining);
    if remaining > 0 {
        if let Some(last) = visible.last_mut() {
            last.see_more = true;
        }
    }
    let more = tiles(&images[visible_count..], visible_count, see_more_label, visible_count, remaining);

    render_template("gallery", GALLERY_TPL, &Gallery {
        images_json,
        total: images.len(),
        title: locale.pick("Galerie Foto", "Photo Gallery"),
        visible,
        has_more: remaining > 0,
        more,
    })
}

fn tiles<'a>(images: &'a [GalleryImage], first_index: usize, see_more_label: &'a str,
             visible_count: usize, remaining: usize) -> Vec<Tile<'a>> {
    images.iter()
        .enumerate()
        .map(|(i, image)| Tile {
            index: first_index + i,
            path: &image.path,
            alt: &image.alt,
            see_more: false,
            see_more_label,
            visible_count,
            remaining,
        })
        .collect()
}
