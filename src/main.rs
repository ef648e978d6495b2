use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use product_parser::config::{Config, Overrides};
use product_parser::{server, Extractor};

#[derive(Parser)]
#[command(
    name = "product-parser",
    about = "Extract title, image and price from product pages",
    version
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP scrape service
    Serve {
        /// Address to bind (env: PRODUCT_PARSER_HOST, default 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (env: PORT, default 5000)
        #[arg(long)]
        port: Option<u16>,
        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Extract metadata from one URL and print it as JSON
    Extract {
        /// Product page URL
        url: String,
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

#[derive(clap::Args)]
struct FetchArgs {
    /// Request timeout in seconds (env: PRODUCT_PARSER_TIMEOUT_SECS, default 15)
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// User-Agent header sent to shops (env: PRODUCT_PARSER_USER_AGENT)
    #[arg(long)]
    user_agent: Option<String>,
    /// Maximum redirects to follow (env: PRODUCT_PARSER_MAX_REDIRECTS, default 10)
    #[arg(long)]
    max_redirects: Option<usize>,
    /// Largest page body to read, in bytes (env: PRODUCT_PARSER_MAX_BODY_BYTES, default 5 MiB)
    #[arg(long)]
    max_body_bytes: Option<usize>,
}

impl FetchArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent,
            max_redirects: self.max_redirects,
            max_body_bytes: self.max_body_bytes,
            ..Default::default()
        }
    }
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match cli.command {
        Commands::Serve { host, port, fetch } => {
            let config = Config::resolve(Overrides {
                host,
                port,
                ..fetch.into_overrides()
            });
            let listener = server::bind(&config.host, config.port).await?;
            let extractor = Extractor::new(&config)?;
            server::start(listener, extractor).await
        }
        Commands::Extract { url, fetch } => {
            let config = Config::resolve(fetch.into_overrides());
            let extractor = Extractor::new(&config)?;
            let result = extractor.extract(&url).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}
