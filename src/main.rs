use anyhow::{Context, Result};
use clap::{Arg, Command, value_parser};
use menuboard::{Config, Document, HeadlessViewport, MenuDocument, MenuSource, PageController, Shell};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pure HTML
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,menuboard=info".to_string()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = Command::new("menuboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a restaurant menu page the way a visitor at the given URL would see it")
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .help("Page URL; a menu hash in ?hash= or /menu/<hash> selects a personalized menu")
                .required(true),
        )
        .arg(
            Arg::new("api-base")
                .long("api-base")
                .value_name("URL")
                .help("Menu API base address (overrides MENU_API_BASE and --config)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON config file"),
        )
        .arg(
            Arg::new("static-menu")
                .long("static-menu")
                .value_name("FILE")
                .help("Menu JSON to pre-render as the static menu"),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .value_name("MS")
                .help("Upper bound on the menu request")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .value_name("CATEGORY")
                .help("Category to select after loading (\"all\" shows everything)"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PX")
                .help("Viewport width used for filter behavior")
                .value_parser(value_parser!(u32))
                .default_value("1280"),
        )
        .get_matches();

    // Step 1: Configuration (the base address comes from the flag, then the environment, then the file)
    let config_path = matches.get_one::<String>("config").map(Path::new);
    let api_base_flag = matches.get_one::<String>("api-base").map(String::as_str);
    let mut config = Config::resolve(config_path, |key| std::env::var(key).ok(), api_base_flag)
        .context("Failed to resolve configuration")?;
    if let Some(ms) = matches.get_one::<u64>("timeout-ms") {
        config = config.with_timeout(Duration::from_millis(*ms));
    }

    // Step 2: Page shell with the optional static menu
    let static_menu = match matches.get_one::<String>("static-menu") {
        Some(path) => Some(
            MenuDocument::load(path).with_context(|| format!("Failed to load static menu {}", path))?,
        ),
        None => None,
    };
    let mut doc = Document::new();
    let shell = Shell::build(&mut doc, static_menu.as_ref());

    // Step 3: Page load
    let url = matches
        .get_one::<String>("url")
        .context("--url is required")?;
    let loaded = PageController::new(config).load(&mut doc, shell, url).await;
    match &loaded.source {
        MenuSource::Static => info!("showing static menu"),
        MenuSource::Dynamic { hash } => info!(%hash, "showing personalized menu"),
        MenuSource::Failed { hash, failure } => warn!(%hash, ?failure, "personalized menu unavailable"),
    }

    // Step 4: Optional filter selection
    if let Some(category) = matches.get_one::<String>("filter") {
        let width = matches.get_one::<u32>("width").copied().unwrap_or(1280);
        let mut viewport = HeadlessViewport::new(width);
        if !loaded.view.select(&mut doc, &mut viewport, category) {
            warn!(%category, "no filter control for category");
        }
    }

    println!("{}", doc.to_html(doc.root()));
    Ok(())
}
