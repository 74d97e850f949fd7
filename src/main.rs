use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roomkit::config::Config;
use roomkit::resource::{get_all_resource_keys, get_resource};
use roomkit::{ApiClient, Credentials, ListOptions, ResourceClient};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line client for HAL meeting-room APIs
#[derive(Parser, Debug)]
#[command(name = "roomkit", version, about, long_about = None)]
struct Args {
    /// API root URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (overrides ROOMKIT_TOKEN and the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Persist the effective base URL, page size and any --token value to the config file
    #[arg(long, global = true)]
    save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known resource types
    Resources,
    /// Walk a collection, one JSON object per line
    List {
        resource: String,
        /// Page size hint for the first request
        #[arg(long)]
        page_size: Option<u32>,
        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Fetch one item by id
    Get { resource: String, id: String },
    /// Create an item from JSON (inline or @file)
    Create {
        resource: String,
        #[arg(long)]
        data: String,
    },
    /// Update an item from JSON (inline or @file)
    Update {
        resource: String,
        id: String,
        #[arg(long)]
        data: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("roomkit started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("roomkit").join("roomkit.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".roomkit").join("roomkit.log");
    }
    PathBuf::from("roomkit.log")
}

/// `--data` accepts inline JSON or `@path/to/file.json`
fn read_data(arg: &str) -> Result<Value> {
    let text = match arg.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => arg.to_string(),
    };
    serde_json::from_str(&text).context("--data is not valid JSON")
}

fn resource_client(api: ApiClient, key: &str) -> Result<ResourceClient> {
    ResourceClient::from_registry(api, key).with_context(|| {
        format!(
            "Unknown resource '{}'. Known resources: {}",
            key,
            get_all_resource_keys().join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let mut config = Config::load();
    let base_url = config.effective_base_url(args.base_url.as_deref());
    let token = config.effective_token(args.token.as_deref());

    let credentials = match &token {
        Some(token) => Credentials::bearer(token.clone()),
        None => {
            tracing::warn!("No token configured, sending unauthenticated requests");
            Credentials::anonymous()
        }
    };
    let api = ApiClient::new(&base_url, credentials, config.timeout())
        .with_context(|| format!("Failed to create API client for {}", base_url))?;

    tracing::info!("Using API root: {}", base_url);

    match args.command {
        Command::Resources => {
            for key in get_all_resource_keys() {
                if let Some(def) = get_resource(key) {
                    println!("{:<10} {:<16} /{}", key, def.display_name, def.path);
                }
            }
        }
        Command::List {
            resource,
            page_size,
            limit,
        } => {
            let client = resource_client(api, &resource)?;
            let page_size = page_size.or(config.page_size);
            if args.save {
                config.page_size = page_size;
            }

            let mut pages = client.list(ListOptions { page_size })?;
            let mut printed = 0usize;
            while limit.map_or(true, |limit| printed < limit) {
                let Some(item) = pages.next().await else {
                    break;
                };
                let item = item.with_context(|| {
                    format!("Listing {} failed after {} items", resource, printed)
                })?;
                println!("{}", serde_json::to_string(&item)?);
                printed += 1;
            }
            tracing::info!(
                "Listed {} {} ({} pages, server total {:?})",
                printed,
                resource,
                pages.pages_fetched(),
                pages.total_items()
            );
        }
        Command::Get { resource, id } => {
            let client = resource_client(api, &resource)?;
            let item = client
                .get(&id)
                .await
                .with_context(|| format!("Failed to get {} {}", resource, id))?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Command::Create { resource, data } => {
            let client = resource_client(api, &resource)?;
            let item = client
                .create(&read_data(&data)?)
                .await
                .with_context(|| format!("Failed to create {}", resource))?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Command::Update { resource, id, data } => {
            let client = resource_client(api, &resource)?;
            let item = client
                .update(&id, &read_data(&data)?)
                .await
                .with_context(|| format!("Failed to update {} {}", resource, id))?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
    }

    if args.save {
        config.remember(base_url, args.token);
        config.save().context("Failed to save config")?;
    }

    Ok(())
}
