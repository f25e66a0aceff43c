use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use calatorii::config::Config;
use calatorii::locale::Locale;
use calatorii::logger::configure_logger;

use crate::commands::{build_cmd, list_cmd, render_cmd, serve_cmd, sitemap_cmd};
use crate::config::open_config;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs the preview server
    Serve,
    /// Lists the slugs of a locale, newest first
    List {
        #[arg(short, long, default_value = "ro")]
        locale: Locale,
    },
    /// Renders one post to stdout
    Render {
        #[arg(short, long, default_value = "ro")]
        locale: Locale,
        /// Slug of the post
        slug: String,
        /// Prints the table of contents as JSON instead of the HTML
        #[arg(long)]
        toc: bool,
    },
    /// Writes the XML sitemap
    Sitemap {
        /// Output file. If empty, the sitemap goes to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Renders every post of every locale into a directory
    Build {
        #[arg(short, long)]
        out_dir: PathBuf,
    },
}

fn setup(config_path: Option<String>) -> Result<Config> {
    let config = open_config(config_path.map(PathBuf::from))?;
    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    Ok(config)
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = setup(args.config_path)?;

    match args.command {
        Command::Serve => {
            info!("Starting calatorii =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
            info!("Listening on {}:{}", config.server.address, config.server.port);
            serve_cmd(config).await
        }
        Command::List { locale } => list_cmd(&config, locale),
        Command::Render { locale, slug, toc } => render_cmd(&config, locale, &slug, toc),
        Command::Sitemap { output } => sitemap_cmd(&config, output),
        Command::Build { out_dir } => build_cmd(&config, &out_dir),
    }
}
