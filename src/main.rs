use std::fs;

use axum::routing::{delete, get, post};
use axum::Router;
use clap::Parser;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::endpoint_handlers::{
    create_artist, create_show, create_venue, delete_artist, delete_show, delete_venue,
    get_artist, get_artists, get_shows, get_venue, get_venues, search_artists, search_venues,
    update_artist, update_venue,
};

mod classify;
mod endpoint_handlers;
mod error;
mod forms;
mod listings;
mod responses;

#[derive(Clone)]
pub struct DatabaseState {
    connection: DatabaseConnection,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, short, default_value_t = 3)]
    verbosity: usize,
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
    #[arg(long, short)]
    config: String,
}

#[derive(Deserialize)]
struct Config {
    port: u16,
    postgres: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    stderrlog::new()
        .verbosity(args.verbosity)
        .quiet(args.quiet)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
        .unwrap();

    info!("Configuration path: {}", args.config);
    let config_string = match fs::read_to_string(&args.config) {
        Ok(contents) => contents,
        Err(err) => {
            error!("Error opening configuration file: {}", err);
            return;
        }
    };
    let config: Config = match serde_json::from_str(&config_string) {
        Ok(config) => config,
        Err(err) => {
            error!("Malformed configuration: {}", err);
            return;
        }
    };

    let mut options = ConnectOptions::new(config.postgres);
    options.max_connections(5);
    let connection = match Database::connect(options).await {
        Ok(connection) => connection,
        Err(err) => {
            error!("Error connecting to database: {}", err);
            return;
        }
    };
    if let Err(err) = Migrator::up(&connection, None).await {
        error!("Error running migrations: {}", err);
        return;
    }
    let state = DatabaseState { connection };

    let app: Router = Router::new()
        .route("/", get(|| async { "Welcome to Bandstand!" }))
        .route("/venues", get(get_venues).post(create_venue))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/:venue_id",
            get(get_venue).put(update_venue).delete(delete_venue),
        )
        .route("/artists", get(get_artists).post(create_artist))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/:artist_id",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
        .route("/shows", get(get_shows).post(create_show))
        .route("/shows/:show_id", delete(delete_show))
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("Listening on 0.0.0.0:{}", config.port);
    info!("Welcome to Bandstand!");

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Error binding port {}: {}", config.port, err);
            return;
        }
    };
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
}
