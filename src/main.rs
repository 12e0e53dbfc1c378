use clap::Parser;
use linkcard::{
    build_router, setup_logging, CardService, FsArticleStore, LogConfig,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "linkcard", about = "Preview card generator and cache server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "LINKCARD_HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000, env = "PORT")]
    port: u16,

    /// Directory holding generated card artifacts
    #[arg(long, default_value = "public/articles", env = "LINKCARD_ARTICLES_DIR")]
    articles_dir: PathBuf,

    /// Directory for rolling log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Disable the rolling file log
    #[arg(long)]
    no_log_file: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    setup_logging(LogConfig {
        log_dir: args.log_dir.clone(),
        log_level: args.log_level.clone(),
        console_output: true,
        file_output: !args.no_log_file,
    });

    let store = Arc::new(FsArticleStore::new(&args.articles_dir)?);
    let service = Arc::new(CardService::new(store));
    let app = build_router(service);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, articles_dir = %args.articles_dir.display(), "linkcard listening");

    axum::serve(listener, app).await?;
    Ok(())
}
