use anyhow::Context;
use clap::{Parser, Subcommand};
use platewise_api::RestApi;
use platewise_core::Query;
use platewise_similarity::{RecommendationView, Recommender, RecommenderConfig};
use platewise_storage::CatalogLoader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-based restaurant recommender
#[derive(Parser, Debug)]
#[command(name = "platewise")]
#[command(about = "Recommend restaurants by preference similarity", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Optional JSON file with recommender limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API
    Serve {
        /// Catalog file (.csv or .json)
        #[arg(short, long)]
        catalog: PathBuf,

        /// HTTP API port
        #[arg(long, default_value_t = 8080)]
        http_port: u16,

        /// Largest result count a request may ask for (overrides --config)
        #[arg(long)]
        max_limit: Option<usize>,
    },
    /// Print recommendations for one query
    Recommend {
        /// Catalog file (.csv or .json)
        #[arg(short, long)]
        catalog: PathBuf,

        #[arg(long)]
        cuisine: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        price: String,

        #[arg(long)]
        alcohol: String,

        #[arg(long)]
        parking: String,

        /// Importance of the overall rating
        #[arg(long, default_value_t = platewise_core::DEFAULT_WEIGHT)]
        overall: f64,

        /// Importance of the food rating
        #[arg(long, default_value_t = platewise_core::DEFAULT_WEIGHT)]
        food: f64,

        /// Importance of the service rating
        #[arg(long, default_value_t = platewise_core::DEFAULT_WEIGHT)]
        service: f64,

        /// Number of recommendations
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Include per-field score contributions (JSON only)
        #[arg(long)]
        explain: bool,
    },
    /// Print the fitted vocabulary as JSON
    Options {
        /// Catalog file (.csv or .json)
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

fn resolve_config(
    path: Option<&Path>,
    max_limit: Option<usize>,
) -> anyhow::Result<RecommenderConfig> {
    let mut config = match path {
        Some(path) => RecommenderConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => RecommenderConfig::default(),
    };
    if let Some(max_limit) = max_limit {
        config.max_limit = max_limit;
    }
    config.validate().context("invalid recommender limits")?;
    Ok(config)
}

fn load_recommender(
    catalog: &Path,
    config: Option<&Path>,
    max_limit: Option<usize>,
) -> anyhow::Result<Recommender> {
    let config = resolve_config(config, max_limit)?;
    let catalog = CatalogLoader::from_path(catalog)
        .with_context(|| format!("loading catalog {}", catalog.display()))?;
    Ok(Recommender::build(catalog, config)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = args.config.as_deref();

    match args.command {
        Command::Serve {
            catalog,
            http_port,
            max_limit,
        } => {
            info!("Starting platewise v{}", env!("CARGO_PKG_VERSION"));
            info!("Catalog: {:?}", catalog);

            let recommender = Arc::new(load_recommender(&catalog, config_path, max_limit)?);

            let http_handle = std::thread::spawn(move || {
                let sys = actix_web::rt::System::new();
                sys.block_on(async {
                    if let Err(e) = RestApi::start(recommender, http_port).await {
                        tracing::error!("HTTP server error: {}", e);
                    }
                })
            });

            info!("HTTP API: http://localhost:{}/", http_port);

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
                _ = tokio::task::spawn_blocking(move || {
                    http_handle.join().ok();
                }) => {
                    info!("HTTP server stopped");
                }
            }

            info!("Shutting down...");
        }
        Command::Recommend {
            catalog,
            cuisine,
            city,
            price,
            alcohol,
            parking,
            overall,
            food,
            service,
            limit,
            json,
            explain,
        } => {
            let recommender = load_recommender(&catalog, config_path, None)?;
            let query =
                Query::new(cuisine, city, price, alcohol, parking).with_weights(overall, food, service);
            let limit = limit.unwrap_or(recommender.config().default_limit);

            if explain {
                let explained = recommender.explain(&query, limit)?;
                println!("{}", serde_json::to_string_pretty(&explained)?);
                return Ok(());
            }

            let ranked = recommender.recommend(&query, limit)?;
            let views = RecommendationView::from_ranked_list(&ranked);
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else if views.is_empty() {
                println!("No restaurants matched.");
            } else {
                for view in &views {
                    println!("{}\n", view);
                }
            }
        }
        Command::Options { catalog } => {
            let recommender = load_recommender(&catalog, config_path, None)?;
            println!("{}", serde_json::to_string_pretty(recommender.vocabulary())?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_serve_parses_max_limit() {
        let args = Args::try_parse_from([
            "platewise",
            "serve",
            "--catalog",
            "data.csv",
            "--max-limit",
            "20",
        ])
        .unwrap();
        match args.command {
            Command::Serve {
                max_limit,
                http_port,
                ..
            } => {
                assert_eq!(max_limit, Some(20));
                assert_eq!(http_port, 8080);
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_max_limit_overrides_default() {
        let config = resolve_config(None, Some(20)).unwrap();
        assert_eq!(config.max_limit, 20);
        assert_eq!(config.default_limit, 5);

        assert_eq!(resolve_config(None, None).unwrap(), RecommenderConfig::default());
    }

    #[test]
    fn test_max_limit_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_limit": 2, "max_limit": 4}}"#).unwrap();

        let config = resolve_config(Some(file.path()), Some(7)).unwrap();
        assert_eq!(config.max_limit, 7);
        assert_eq!(config.default_limit, 2);
    }

    #[test]
    fn test_max_limit_override_is_validated() {
        assert!(resolve_config(None, Some(0)).is_err());
        // default_limit 5 no longer fits under 3
        assert!(resolve_config(None, Some(3)).is_err());
    }
}
