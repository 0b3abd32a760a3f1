use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::options::{
    or_default, CorsOptions, DEFAULT_ALLOW_HEADERS, DEFAULT_ALLOW_METHODS,
    DEFAULT_EXPOSE_HEADERS,
};

/// Resolved, immutable CORS settings.
///
/// A `Policy` is built once from [`CorsOptions`] and then only read, so it can be shared between
/// workers behind an `Arc` without any locking. Header values are joined and validated at
/// construction time so that request handling is a handful of clones.
///
/// Note that `allow_headers` is accepted and kept but is not sent on any response header.
/// `Access-Control-Allow-Headers` carries the `expose_headers` list, the same value as
/// `Access-Control-Expose-Headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    allow_credentials: bool,
    allow_headers: Vec<String>,
    allow_methods: Vec<String>,
    expose_headers: Vec<String>,

    allow_methods_baked: HeaderValue,
    expose_headers_baked: HeaderValue,
}

impl Policy {
    /// Resolves `opts` into a policy, filling unset fields with the crate defaults.
    ///
    /// This never fails. Values are not validated as header or method names.
    pub fn new(opts: CorsOptions) -> Self {
        let CorsOptions {
            allow_credentials,
            allow_headers,
            allow_methods,
            expose_headers,
        } = opts;

        let allow_methods = or_default(allow_methods, DEFAULT_ALLOW_METHODS);
        let expose_headers = or_default(expose_headers, DEFAULT_EXPOSE_HEADERS);

        Policy {
            allow_credentials: allow_credentials.unwrap_or(false),
            allow_headers: or_default(allow_headers, DEFAULT_ALLOW_HEADERS),
            allow_methods_baked: bake(header::ACCESS_CONTROL_ALLOW_METHODS, &allow_methods),
            expose_headers_baked: bake(header::ACCESS_CONTROL_EXPOSE_HEADERS, &expose_headers),
            allow_methods,
            expose_headers,
        }
    }

    /// Whether credentialed cross-origin requests are advertised as permitted.
    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }

    /// Resolved allowed request headers, in configured order.
    pub fn allow_headers(&self) -> &[String] {
        &self.allow_headers
    }

    /// Resolved allowed methods, in configured order.
    pub fn allow_methods(&self) -> &[String] {
        &self.allow_methods
    }

    /// Resolved exposed response headers, in configured order.
    pub fn expose_headers(&self) -> &[String] {
        &self.expose_headers
    }

    /// Computes the CORS response headers for a request carrying `req_headers`.
    ///
    /// The request's `Origin` is echoed back as-is. Without one, `*` is used unless credentials
    /// are allowed, in which case the origin header is sent empty.
    pub fn cors_headers(&self, req_headers: &HeaderMap) -> CorsHeaders {
        let allow_origin = match req_headers.get(header::ORIGIN) {
            Some(origin) if !origin.is_empty() => origin.clone(),
            _ if self.allow_credentials => HeaderValue::from_static(""),
            _ => HeaderValue::from_static("*"),
        };

        let allow_credentials = if self.allow_credentials {
            HeaderValue::from_static("true")
        } else {
            HeaderValue::from_static("false")
        };

        let headers = CorsHeaders {
            allow_origin,
            allow_headers: self.expose_headers_baked.clone(),
            allow_credentials,
            allow_methods: self.allow_methods_baked.clone(),
            expose_headers: self.expose_headers_baked.clone(),
        };

        log::trace!("computed CORS headers: {:?}", headers);

        headers
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::new(CorsOptions::default())
    }
}

impl From<CorsOptions> for Policy {
    fn from(opts: CorsOptions) -> Self {
        Policy::new(opts)
    }
}

fn bake(name: HeaderName, list: &[String]) -> HeaderValue {
    let joined = list.join(",");

    match HeaderValue::from_str(&joined) {
        Ok(val) => val,
        Err(_) => {
            log::warn!(
                "{} value {:?} is not a valid header value; sending it empty",
                name,
                joined
            );
            HeaderValue::from_static("")
        }
    }
}

/// The five CORS response headers computed for one request.
///
/// Inside the [`Cors`](crate::Cors) middleware these are stored in the request extensions before
/// the wrapped service runs, so handlers can inspect what will be sent:
///
/// ```
/// use actix_cors_preflight::CorsHeaders;
/// use actix_web::get;
///
/// #[get("/")]
/// async fn index(cors: CorsHeaders) -> String {
///     format!("{:?}", cors.allow_origin())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
    allow_credentials: HeaderValue,
    allow_methods: HeaderValue,
    expose_headers: HeaderValue,
}

impl CorsHeaders {
    /// Value of `Access-Control-Allow-Origin`.
    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    /// Value of `Access-Control-Allow-Headers`.
    pub fn allow_headers(&self) -> &HeaderValue {
        &self.allow_headers
    }

    /// Value of `Access-Control-Allow-Credentials`.
    pub fn allow_credentials(&self) -> &HeaderValue {
        &self.allow_credentials
    }

    /// Value of `Access-Control-Allow-Methods`.
    pub fn allow_methods(&self) -> &HeaderValue {
        &self.allow_methods
    }

    /// Value of `Access-Control-Expose-Headers`.
    pub fn expose_headers(&self) -> &HeaderValue {
        &self.expose_headers
    }

    fn pairs(&self) -> [(HeaderName, &HeaderValue); 5] {
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, &self.allow_origin),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, &self.allow_headers),
            (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, &self.allow_credentials),
            (header::ACCESS_CONTROL_ALLOW_METHODS, &self.allow_methods),
            (header::ACCESS_CONTROL_EXPOSE_HEADERS, &self.expose_headers),
        ]
    }

    /// Sets all five headers on `headers`, replacing existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, val) in self.pairs() {
            headers.insert(name, val.clone());
        }
    }

    /// Sets the headers that are not already present on `headers`.
    ///
    /// Used on responses from a wrapped service so that anything the service set itself wins.
    pub fn apply_missing(&self, headers: &mut HeaderMap) {
        for (name, val) in self.pairs() {
            if !headers.contains_key(&name) {
                headers.insert(name, val.clone());
            }
        }
    }
}
