use mcp_web_search_server::config::ServerConfig;
use mcp_web_search_server::logging::init_tracing;
use mcp_web_search_server::server::McpServer;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("mcp-web-search-server: failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mcp-web-search-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        allowed_domains = ?config.allowed_domains.domains(),
        endpoint = %config.search.endpoint,
        "starting mcp-web-search-server"
    );

    let server = match McpServer::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("mcp-web-search-server: startup error: {e}");
            std::process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    if let Err(e) = server.run(shutdown).await {
        eprintln!("mcp-web-search-server: fatal error: {e}");
        std::process::exit(1);
    }

    tracing::info!("server stopped");
}
