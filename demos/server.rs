use std::{env, io, path::Path};

use actix_cors_preflight::{Cors, CorsOptions};
use actix_web::{get, middleware::Logger, web, App, HttpServer};

#[get("/greet/{name}")]
async fn greet(name: web::Path<String>) -> String {
    format!("Hello, {name}!")
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = env::args().nth(1).unwrap_or_else(|| "demos/cors.toml".to_owned());

    let opts = if Path::new(&config).exists() {
        log::info!("loading CORS options from {config}");
        CorsOptions::parse_toml(&config)?
    } else {
        log::info!("{config} not found; using default CORS options");
        CorsOptions::default()
    };

    // resolved once, shared by every worker
    let cors = Cors::new(opts);

    log::info!("starting HTTP server at http://localhost:8080");

    HttpServer::new(move || {
        App::new()
            .wrap(cors.clone())
            .wrap(Logger::default())
            .service(greet)
            // unmatched routes and methods still answer preflights
            .default_service(cors.fallback())
    })
    .workers(2)
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
