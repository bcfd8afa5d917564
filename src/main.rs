//! todo-service entry point
//!
//! Parses arguments, installs the log subscriber, opens the store and
//! serves until interrupted. Errors go to stderr with a non-zero exit.

use todo_service::cli::Cli;
use todo_service::http_server::HttpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Cli::parse_args().into_config();

    let result = match HttpServer::open(config) {
        Ok(server) => server.start().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
