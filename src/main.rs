use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod store;

use config::Config;
use store::{
    DataStore, IdentityStore,
    clock::SystemClock,
    session::{FileSessionStorage, MemorySessionStorage, SessionStorage},
};

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Dayflow HR"
}

fn session_storage(config: &Config) -> Box<dyn SessionStorage> {
    match &config.session_file {
        Some(path) => {
            let storage = FileSessionStorage::new(path);
            info!(path = %storage.path().display(), "Persisting session to file");
            Box::new(storage)
        }
        None => {
            warn!("SESSION_FILE not set, signed-in identity will not survive a restart");
            Box::new(MemorySessionStorage::default())
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    // Both stores live for the whole process and are shared with every worker
    let domain = Data::new(DataStore::seeded(Arc::new(SystemClock)));
    let identity = Data::new(IdentityStore::new(
        session_storage(&config),
        config.admin_email.clone(),
    ));

    match identity.restore_on_startup(&domain)? {
        Some(user) => info!(user_id = %user.id, "Restored signed-in identity"),
        None => info!("No signed-in identity to restore"),
    }

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(domain.clone())
            .app_data(identity.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            // Configure auth + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("binding {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
