//! Serverless HTTP edge router.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                 EDGE ROUTER                    │
//!                      │                                                │
//!   Inbound event      │  ┌────────┐   ┌────────────┐   ┌───────────┐  │
//!   ──────────────────►│  │  http  │──►│ dispatcher │──►│ store.get │  │
//!                      │  │ server │   │ (classify) │   │ (by path) │  │
//!                      │  └────────┘   └─────┬──────┘   └───────────┘  │
//!                      │                     │                          │
//!                      │       ┌─────────────┼─────────────┐           │
//!                      │       ▼             ▼             ▼           │
//!                      │  ┌─────────┐   ┌─────────┐   ┌─────────┐     │
//!   Response           │  │ literal │   │ forward │   │ invoke  │     │
//!   ◄──────────────────┼──│  reply  │   │  (url)  │   │  (arn)  │     │
//!                      │  └─────────┘   └─────────┘   └─────────┘     │
//!                      └────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use edge_router::config::RouterConfig;
use edge_router::forward::UrlForwarder;
use edge_router::invoke::LambdaInvoker;
use edge_router::lifecycle::Shutdown;
use edge_router::observability::{logging, metrics};
use edge_router::routing::Dispatcher;
use edge_router::store::RedisRouteStore;
use edge_router::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("edge_router=info,tower_http=info");

    tracing::info!("edge-router v0.1.0 starting");

    let config = match RouterConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Startup configuration is unusable");
            return Err(err.into());
        }
    };
    config.log_startup();

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(err) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %err,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    // The store must be live before any traffic is accepted.
    let store = RedisRouteStore::connect(
        &config.store,
        Duration::from_secs(config.timeouts.store_secs),
    )
    .await?;

    let forwarder = UrlForwarder::new(
        Duration::from_secs(config.timeouts.forward_secs),
        Duration::from_secs(config.timeouts.connect_secs),
    )?;
    let invoker = LambdaInvoker::from_env(
        &config.invoker,
        Duration::from_secs(config.timeouts.invoke_secs),
    )
    .await;

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(store),
        forwarder,
        Arc::new(invoker),
    ));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(&config, dispatcher);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
