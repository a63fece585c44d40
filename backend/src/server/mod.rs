//! Server construction and wiring.

mod config;
mod state_builders;

pub use config::Settings;
pub use state_builders::{build_http_state, in_memory_http_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use tracing::{error, info, warn};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::organizations::{
    add_member, create_organization, get_organization, list_organizations, remove_member,
    update_member_access_level,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, get_user, list_users};
use crate::middleware::Trace;
use crate::outbound::persistence::DocumentStore;

/// Assemble the application: middleware, routes, and shared state.
///
/// Collection paths accept both the bare and the trailing-slash form via
/// path normalisation.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(NormalizePath::trim())
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(create_organization)
        .service(list_organizations)
        .service(get_organization)
        .service(add_member)
        .service(update_member_access_level)
        .service(remove_member)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Connect the store described by the settings, if any.
///
/// The driver connects lazily, so an unreachable store does not fail
/// startup: index creation is attempted, its failure logged, and every later
/// request surfaces the store failure uniformly.
async fn connect_store(settings: &Settings) -> std::io::Result<Option<DocumentStore>> {
    let Some(url) = settings.database_url() else {
        warn!("no database configured; using in-memory repositories");
        return Ok(None);
    };
    let store = DocumentStore::connect(url, settings.database_name())
        .await
        .map_err(|err| std::io::Error::other(format!("invalid store configuration: {err}")))?;
    match store.ensure_indexes().await {
        Ok(()) => info!(database = settings.database_name(), "document store ready"),
        Err(err) => {
            error!(error = %err, "unique index creation failed; continuing without it");
        }
    }
    Ok(Some(store))
}

/// Construct and spawn the HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when the store configuration is invalid or
/// the listen socket cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: &Settings,
) -> std::io::Result<Server> {
    let store = connect_store(settings).await?;
    let http_state = web::Data::new(build_http_state(store));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(settings.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
