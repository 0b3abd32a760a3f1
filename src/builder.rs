use std::{
    future::{ready, Ready},
    sync::Arc,
};

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};

use crate::{CorsFallback, CorsMiddleware, CorsOptions, Policy};

/// Middleware factory for static CORS response headers.
///
/// Every response passing through the middleware gets the five `Access-Control-*` headers
/// computed by [`Policy::cors_headers`]. `OPTIONS` requests are answered directly with
/// `204 No Content` and never reach the wrapped service.
///
/// The resolved [`Policy`] lives behind an `Arc`, so a `Cors` built once before the server starts
/// can be cloned into every worker.
///
/// # Example
/// ```
/// use actix_cors_preflight::{Cors, CorsOptions};
/// use actix_web::{web, App};
///
/// let cors = Cors::new(CorsOptions::new().allow_credentials(true));
///
/// let app = App::new()
///     .wrap(cors.clone())
///     .route("/", web::get().to(|| async { "hello" }))
///     .default_service(cors.fallback());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cors {
    policy: Arc<Policy>,
}

impl Cors {
    /// Resolves `opts` and builds the middleware.
    pub fn new(opts: CorsOptions) -> Cors {
        Cors::from_policy(Policy::new(opts))
    }

    /// Builds the middleware around an already resolved policy.
    pub fn from_policy(policy: impl Into<Arc<Policy>>) -> Cors {
        Cors {
            policy: policy.into(),
        }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Returns a terminal service sharing this policy, for use as a default service.
    pub fn fallback(&self) -> CorsFallback {
        CorsFallback::from_policy(Arc::clone(&self.policy))
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,

    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware {
            service,
            policy: Arc::clone(&self.policy),
        }))
    }
}

#[cfg(test)]
mod test {
    use actix_web::{
        http::{header, StatusCode},
        test::{self, TestRequest},
    };

    use super::*;

    #[test]
    fn default_uses_default_policy() {
        assert_eq!(Cors::default().policy(), &Policy::default());
    }

    #[test]
    fn fallback_shares_policy() {
        let cors = Cors::new(CorsOptions::new().allow_methods(["GET"]));
        let fallback = cors.fallback();

        assert!(std::ptr::eq(cors.policy(), fallback.policy()));
    }

    #[actix_web::test]
    async fn default() {
        let cors = Cors::default()
            .new_transform(test::ok_service())
            .await
            .unwrap();

        let req = TestRequest::default()
            .insert_header((header::ORIGIN, "https://www.example.com"))
            .to_srv_request();

        let resp = test::call_service(&cors, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://www.example.com"
        );
    }
}
