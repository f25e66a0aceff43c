pub mod category;
pub mod config;
pub mod content;
pub mod content_cache;
pub mod corpus;
pub mod includes;
pub mod locale;
pub mod logger;
pub mod pages;
pub mod post_list;
pub mod post_processor;
pub mod render_post;
pub mod server;
pub mod template_tags;
mod test_data;
mod text_utils;
pub mod view;
