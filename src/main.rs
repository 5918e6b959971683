use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use foris::config;
use foris::csrf::generate_token;
use foris::handlers::helpers::{render_config_page, PageRender};
use foris::i18n::{Catalog, CatalogError, Identity, Localizer};
use foris::models::AppState;
use foris::routes::build_router;
use foris::store::{ConfigStore, MemoryStore, StoreError};
use foris::templates::RequestInfo;

fn open_store() -> Result<Arc<dyn ConfigStore>, StoreError> {
    match config::get_state_file() {
        Some(path) => Ok(Arc::new(MemoryStore::open(path)?)),
        None => Ok(Arc::new(MemoryStore::with_factory_defaults())),
    }
}

fn open_localizer() -> Result<Arc<dyn Localizer>, CatalogError> {
    let lang = config::get_lang();
    match config::get_catalog_path() {
        Some(path) => {
            let catalog = Catalog::load(lang, &path)?;
            tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded translation catalog");
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(Identity)),
    }
}

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    let store = open_store().unwrap_or_else(|e| {
        tracing::error!(%e, "Failed to open configuration state file");
        eprintln!("{}: {}", "Failed to open configuration state file".red(), e);
        process::exit(1);
    });
    let localizer = open_localizer().unwrap_or_else(|e| {
        tracing::error!(%e, "Failed to load translation catalog");
        eprintln!("{}: {}", "Failed to load translation catalog".red(), e);
        process::exit(1);
    });
    AppState::new(store, localizer)
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", "Invalid host/port format".red(), e);
            process::exit(1);
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting Foris server");
    println!("{} {}", "Web server running on".green(), format!("http://{}", addr).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", "Server error".red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                format!("Failed to bind to {}", addr).red(),
                e,
                "Please stop any process using this port, or start the server with a different --port value.".yellow()
            );
            process::exit(1);
        }
    }
}

fn render_page(state: &AppState, slug: &str, path: Option<String>) {
    let Some(page) = state.page(slug) else {
        let known: Vec<&str> = state.pages.iter().map(|p| p.slug()).collect();
        eprintln!("{} {} (known pages: {})", "Unknown configuration page".red(), slug, known.join(", "));
        process::exit(1);
    };
    let trans = state.localizer.as_ref();
    let mut form = page.build_form(trans, None);
    form.load_from(state.store.as_ref());

    let request = RequestInfo::new(path.unwrap_or_else(|| format!("/config/{}", slug)));
    let csrf_token = generate_token();
    let rendered = render_config_page(&PageRender {
        pages: &state.pages,
        page,
        form: &form,
        trans,
        request: &request,
        csrf_token: &csrf_token,
        messages: &[],
    });
    match rendered {
        Ok(html) => println!("{}", html),
        Err(e) => {
            tracing::error!(%e, "Failed to render page");
            eprintln!("{}: {}", "Failed to render page".red(), e);
            process::exit(1);
        }
    }
}

fn check_config(env_file: Option<&str>) {
    config::load_env_file(env_file);
    let mut problems = 0;

    println!("{} {}:{}", "Listen address:".cyan(), config::get_host(), config::get_port());
    println!("{} {}", "Language:".cyan(), config::get_lang());

    match config::get_catalog_path() {
        None => println!("{} none, using built-in English", "Catalog:".cyan()),
        Some(path) => match Catalog::load(config::get_lang(), &path) {
            Ok(catalog) => println!("{} {} ({} entries)", "Catalog:".cyan(), path.display(), catalog.len()),
            Err(e) => {
                problems += 1;
                println!("{} {}: {}", "Catalog:".red(), path.display(), e);
            }
        },
    }

    match config::get_state_file() {
        None => println!("{} none, configuration is kept in memory", "State file:".cyan()),
        Some(path) => match MemoryStore::open(&path) {
            Ok(store) => println!("{} {} ({} options)", "State file:".cyan(), path.display(), store.snapshot().len()),
            Err(e) => {
                problems += 1;
                println!("{} {}: {}", "State file:".red(), path.display(), e);
            }
        },
    }

    if problems > 0 {
        eprintln!("{}", format!("{} problem(s) found", problems).red());
        process::exit(1);
    }
    println!("{}", "Configuration OK".green());
}

#[derive(Parser)]
#[command(
    name = "foris",
    author,
    version,
    about = "Foris router configuration interface",
    long_about = r#"Foris serves the configuration pages of the router administration interface.

Pages render forms bound to configuration options; submitted forms are validated
and saved to the configuration store. Use `--env-file` or environment variables
(FORIS_HOST, FORIS_PORT, FORIS_LANG, FORIS_CATALOG, FORIS_STATE_FILE) to configure it.

Examples:
  1) Serve on all interfaces:
      foris serve --host 0.0.0.0 --port 8080
  2) Print the LAN page:
      foris render lan
"#,
    after_help = "Use `foris <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Print a rendered configuration page to stdout
    Render {
        /// Page slug, e.g. `wan`
        page: String,
        /// Request path used as the form action
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        env_file: Option<String>,
    },
    #[command(about = "Validate configuration", long_about = "Load the translation catalog and the state file named by the environment and report problems.")]
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    match cli.command {
        None => {
            let state = build_state_from_env(None);
            start_server(state, &config::get_host(), config::get_port()).await;
        }
        Some(Commands::Serve { host, port, env_file }) => {
            let state = build_state_from_env(env_file.as_deref());
            let host = host.unwrap_or_else(config::get_host);
            let port = port.unwrap_or_else(config::get_port);
            start_server(state, &host, port).await;
        }
        Some(Commands::Render { page, path, env_file }) => {
            let state = build_state_from_env(env_file.as_deref());
            render_page(&state, &page, path);
        }
        Some(Commands::CheckConfig { env_file }) => check_config(env_file.as_deref()),
    }
}
