use crate::{
    app_state::AppState,
    configuration::Settings,
    routes::{health_check, home, subscriptions},
    telemetry::{request_span, RequestUuid},
};
use anyhow::Context;
use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Fails when the subscriber store is not configured. The page is never
    /// served without a working store client.
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let subscriber_store = config
            .subscriber_store
            .client()
            .context("Failed to construct the subscriber store client")?;

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind `{address}`"))?;

        let app_state = AppState {
            subscriber_store: Arc::new(subscriber_store),
            brand: config.application.brand,
        };

        Ok(Self {
            listener,
            router: router(app_state),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!("Listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router).await
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .merge(health_check::router())
        .merge(home::router())
        .merge(subscriptions::router())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(RequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(app_state)
}
