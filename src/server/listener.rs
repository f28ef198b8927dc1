use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::ServerContext;

/// Binds `cfg.listen_addr` and serves until `shutdown` completes.
pub async fn run(cfg: &Config, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let ctx = Arc::new(ServerContext::from_config(cfg)?);
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("cannot bind {}", cfg.listen_addr))?;

    info!(
        "Listening on {}, serving {}",
        listener.local_addr()?,
        ctx.resolver.root().display()
    );

    serve(listener, ctx, shutdown).await
}

/// Accepts connections, one task each, until `shutdown` completes.
///
/// Connections already running are left to finish on their own.
pub async fn serve(
    listener: TcpListener,
    ctx: Arc<ServerContext>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("No longer accepting connections");
                return Ok(());
            }

            accepted = listener.accept() => {
                let (socket, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };
                debug!("Accepted connection from {}", peer);

                let ctx = Arc::clone(&ctx);
                tokio::spawn(async move {
                    let mut conn = Connection::new(socket, peer.to_string(), ctx);
                    if let Err(e) = conn.run().await {
                        warn!("Connection error from {}: {}", peer, e);
                    }
                });
            }
        }
    }
}
