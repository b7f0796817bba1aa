pub mod routes;
pub mod startup;
pub mod configuration;
pub mod content_type_middleware;
pub mod telemetry;
pub mod utils;
pub mod schema;
pub mod models;
pub mod domain;
pub mod db_interaction;
