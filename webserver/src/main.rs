//! Backend process entry point

use clap::Parser;
use std::net::SocketAddr;

use webserver::{JsonTeamStore, WebServer, WebServerError, WebServerResult};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Rotation & composition backend for the training dashboard")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Directory holding team.json and contests.json
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    shared::logging::init_tracing(Some(&args.log_level));

    let bind_address: SocketAddr = format!("127.0.0.1:{}", args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("invalid port: {e}")))?;

    let store = JsonTeamStore::new(&args.data_dir);
    let server = WebServer::new(store);

    server.run(bind_address).await?;

    shared::logging::log_shutdown("server stopped");
    Ok(())
}
