use std::collections::HashMap;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use healthhub_gateway::client::http::HttpConnector;
use healthhub_gateway::config::Config;
use healthhub_gateway::handlers::{self, Gateway};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().expect("Invalid configuration");
    info!("Forwarding to upstream API at {}", config.api_base_url);

    // One connection pool for every caller
    let gateway = web::Data::new(Gateway::new(Arc::new(HttpConnector::new(config.api_base_url.clone()))));

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "healthhub_gateway".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .expect("Failed to create Prometheus metrics");

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .app_data(gateway.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
