use std::{fs, path::Path};

use serde::Deserialize;

use crate::Error;

/// Request headers advertised when [`CorsOptions::allow_headers`] is left unset.
pub const DEFAULT_ALLOW_HEADERS: &[&str] = &[
    "Content-Type",
    "X-CSRF-Token",
    "Authorization",
    "AccessToken",
    "Token",
];

/// Methods advertised when [`CorsOptions::allow_methods`] is left unset.
pub const DEFAULT_ALLOW_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"];

/// Response headers exposed when [`CorsOptions::expose_headers`] is left unset.
pub const DEFAULT_EXPOSE_HEADERS: &[&str] = &[
    "Content-Length",
    "Content-Type",
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Headers",
];

/// Caller-supplied CORS configuration.
///
/// Every field is optional. Unset fields are replaced with the crate defaults when the options
/// are resolved into a [`Policy`](crate::Policy); set fields are used exactly as given, including
/// empty lists and duplicate entries.
///
/// # Examples
/// ```
/// use actix_cors_preflight::{CorsOptions, Policy};
///
/// let policy = Policy::new(
///     CorsOptions::new()
///         .allow_methods(["GET", "POST"])
///         .expose_headers(["Content-Length"]),
/// );
///
/// assert_eq!(policy.allow_methods(), ["GET", "POST"]);
/// assert!(!policy.allow_credentials());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsOptions {
    /// Advertise that credentialed requests are permitted. Defaults to `false`.
    #[serde(default)]
    pub allow_credentials: Option<bool>,

    /// Request headers the client may send.
    #[serde(default)]
    pub allow_headers: Option<Vec<String>>,

    /// Methods the client may use.
    #[serde(default)]
    pub allow_methods: Option<Vec<String>>,

    /// Response headers visible to cross-origin scripts.
    #[serde(default)]
    pub expose_headers: Option<Vec<String>>,
}

impl CorsOptions {
    /// Returns options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether credentialed requests are advertised as permitted.
    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = Some(allow);
        self
    }

    /// Sets the allowed request headers, replacing the defaults entirely.
    pub fn allow_headers<U, H>(mut self, headers: U) -> Self
    where
        U: IntoIterator<Item = H>,
        H: Into<String>,
    {
        self.allow_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the allowed methods, replacing the defaults entirely.
    pub fn allow_methods<U, M>(mut self, methods: U) -> Self
    where
        U: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.allow_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the exposed response headers, replacing the defaults entirely.
    pub fn expose_headers<U, H>(mut self, headers: U) -> Self
    where
        U: IntoIterator<Item = H>,
        H: Into<String>,
    {
        self.expose_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Parses options from a TOML document.
    ///
    /// Keys are the snake_case field names; missing keys stay unset.
    ///
    /// ```
    /// use actix_cors_preflight::CorsOptions;
    ///
    /// let opts = CorsOptions::from_toml_str(r#"allow_methods = ["GET"]"#).unwrap();
    /// assert_eq!(opts.allow_methods, Some(vec!["GET".to_owned()]));
    /// assert_eq!(opts.allow_headers, None);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses options from the TOML file at `filepath`.
    pub fn parse_toml<P>(filepath: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let contents = fs::read_to_string(filepath.as_ref())?;
        Self::from_toml_str(&contents)
    }
}

pub(crate) fn or_default(list: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    list.unwrap_or_else(|| default.iter().map(|&s| s.to_owned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let opts = CorsOptions::new()
            .allow_credentials(true)
            .allow_headers(vec!["Authorization"])
            .allow_methods(["GET"])
            .expose_headers(Vec::<String>::new());

        assert_eq!(opts.allow_credentials, Some(true));
        assert_eq!(opts.allow_headers, Some(vec!["Authorization".to_owned()]));
        assert_eq!(opts.allow_methods, Some(vec!["GET".to_owned()]));
        assert_eq!(opts.expose_headers, Some(vec![]));
    }

    #[test]
    fn toml_empty_document_leaves_everything_unset() {
        let opts = CorsOptions::from_toml_str("").unwrap();
        assert_eq!(opts, CorsOptions::default());
    }

    #[test]
    fn toml_full_document() {
        let opts = CorsOptions::from_toml_str(
            r#"
            allow_credentials = true
            allow_headers = ["Authorization"]
            allow_methods = ["GET", "PUT"]
            expose_headers = []
            "#,
        )
        .unwrap();

        assert_eq!(opts.allow_credentials, Some(true));
        assert_eq!(opts.allow_headers, Some(vec!["Authorization".to_owned()]));
        assert_eq!(
            opts.allow_methods,
            Some(vec!["GET".to_owned(), "PUT".to_owned()])
        );
        assert_eq!(opts.expose_headers, Some(vec![]));
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let err = CorsOptions::from_toml_str("max_age = 3600").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CorsOptions::parse_toml("./does-not-exist/cors.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn or_default_keeps_explicit_empty_list() {
        assert!(or_default(Some(vec![]), DEFAULT_ALLOW_METHODS).is_empty());
        assert_eq!(
            or_default(None, DEFAULT_ALLOW_METHODS),
            ["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"]
        );
    }
}
