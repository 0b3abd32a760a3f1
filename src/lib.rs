//! Static Cross-Origin Resource Sharing (CORS) headers for Actix Web.
//!
//! A [`Policy`] is resolved once from [`CorsOptions`], filling any unset option with a default
//! list. Every response then carries the same five headers:
//!
//! | Header | Value |
//! |---|---|
//! | `Access-Control-Allow-Origin` | the request's `Origin`; `*` when absent (empty if credentials are allowed) |
//! | `Access-Control-Allow-Headers` | `expose_headers`, comma-joined |
//! | `Access-Control-Allow-Credentials` | `true` or `false` |
//! | `Access-Control-Allow-Methods` | `allow_methods`, comma-joined |
//! | `Access-Control-Expose-Headers` | `expose_headers`, comma-joined |
//!
//! No origin is ever rejected; the configured lists are advertised as-is.
//!
//! Two shapes are provided:
//! - [`Cors`], a middleware for `App::wrap()` and friends. `OPTIONS` requests are answered with
//!   `204 No Content` without calling the wrapped service; everything else is forwarded.
//! - [`CorsFallback`], a terminal service for `default_service()`. `OPTIONS` gets `204`, any
//!   other method gets `404 Not Found`.
//!
//! # Example
//! ```no_run
//! use actix_cors_preflight::{Cors, CorsOptions};
//! use actix_web::{get, App, HttpServer};
//!
//! #[get("/index.html")]
//! async fn index() -> &'static str {
//!     "<p>Hello World!</p>"
//! }
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let cors = Cors::new(
//!         CorsOptions::new()
//!             .allow_methods(["GET", "POST"])
//!             .expose_headers(["Content-Length"]),
//!     );
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .wrap(cors.clone())
//!             .service(index)
//!             .default_service(cors.fallback())
//!     })
//!     .bind(("127.0.0.1", 8080))?
//!     .run()
//!     .await
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(future_incompatible, missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod builder;
mod error;
mod fallback;
mod middleware;
mod options;
mod policy;

pub use crate::{
    builder::Cors,
    error::Error,
    fallback::CorsFallback,
    middleware::{CorsHeadersExtractionError, CorsMiddleware},
    options::{CorsOptions, DEFAULT_ALLOW_HEADERS, DEFAULT_ALLOW_METHODS, DEFAULT_EXPOSE_HEADERS},
    policy::{CorsHeaders, Policy},
};
