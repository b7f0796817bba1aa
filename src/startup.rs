use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    error::InternalError,
    http::{header::{self, HeaderName}, StatusCode},
    web, App, HttpServer
};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{ApplicationSettings, Settings},
    content_type_middleware::ContentTypeGuardFactory,
    db_interaction::Repositories,
    routes::{
        add_shop_cocktails, create_cocktail, create_shop, create_table, get_cocktail, get_shop,
        get_shop_cocktail, get_table, health_check, list_cocktails, list_cocktails_by_ids,
        list_shop_cocktails, list_shop_orders, list_shops, list_table_orders, place_order, provide_order
    },
    utils::{get_connection_pool, status_text_response}
};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database)
            .context("Failed to build database connection pool")?;

        Application::with_repositories(settings.application, Repositories::postgres(pool))
    }

    // Port 0 binds to a random free port, the bound one is reported back in `port`
    pub fn with_repositories(
        settings: ApplicationSettings,
        repositories: Repositories
    ) -> Result<Self, anyhow::Error>{
        let listener = TcpListener::bind((settings.host.as_str(), settings.port))
            .context("Failed to bind listener")?;
        let port = listener.local_addr()?.port();

        tracing::info!(host = %settings.host, port, "Starting server");

        let server = run(listener, repositories)?;

        Ok(Application{
            host: settings.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

fn run(listener: TcpListener, repositories: Repositories) -> Result<Server, std::io::Error>{
    let Repositories{ cocktails, shops, tables, orders } = repositories;

    let cocktails = web::Data::from(cocktails);
    let shops = web::Data::from(shops);
    let tables = web::Data::from(tables);
    let orders = web::Data::from(orders);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(ContentTypeGuardFactory)
            // Outside the content-type guard so preflight requests are answered here
            .wrap(cors())
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .app_data(cocktails.clone())
            .app_data(shops.clone())
            .app_data(tables.clone())
            .app_data(orders.clone())
            .route("/health", web::get().to(health_check))
            .service(
                web::resource("/cocktails")
                    .route(web::get().to(list_cocktails))
                    .route(web::post().to(create_cocktail))
            )
            // Must stay ahead of /cocktails/{cocktail_id}
            .route("/cocktails/list", web::get().to(list_cocktails_by_ids))
            .route("/cocktails/{cocktail_id}", web::get().to(get_cocktail))
            .service(
                web::resource("/shop")
                    .route(web::get().to(list_shops))
                    .route(web::post().to(create_shop))
            )
            .route("/shop/{shop_id}", web::get().to(get_shop))
            .service(
                web::resource("/shop/{shop_id}/cocktail")
                    .route(web::get().to(list_shop_cocktails))
                    .route(web::post().to(add_shop_cocktails))
            )
            .route("/shop/{shop_id}/cocktail/{cocktail_id}", web::get().to(get_shop_cocktail))
            .route("/shop/{shop_id}/order", web::get().to(list_shop_orders))
            .route("/shop/{shop_id}/table", web::post().to(create_table))
            .route("/shop/{shop_id}/table/{table_id}", web::get().to(get_table))
            .service(
                web::resource("/shop/{shop_id}/table/{table_id}/order")
                    .route(web::get().to(list_table_orders))
                    .route(web::post().to(place_order))
            )
            .route(
                "/shop/{shop_id}/table/{table_id}/order/{order_id}",
                web::put().to(provide_order)
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS"])
        .allowed_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token")
        ])
}

// Extractor failures answer with the bare status text, like every other error

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _| {
        tracing::warn!(error = %err, "Rejecting malformed json body");
        InternalError::from_response(err, status_text_response(StatusCode::BAD_REQUEST)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _| {
        tracing::warn!(error = %err, "Rejecting malformed query string");
        InternalError::from_response(err, status_text_response(StatusCode::BAD_REQUEST)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _| {
        tracing::warn!(error = %err, "Rejecting unparseable path parameter");
        InternalError::from_response(err, status_text_response(StatusCode::NOT_FOUND)).into()
    })
}
