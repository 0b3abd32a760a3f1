use std::{
    future::{ready, Ready},
    sync::Arc,
};

use actix_web::{
    dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    Error,
};
use log::debug;

use crate::{middleware::short_circuit, CorsOptions, Policy};

/// Terminal service that answers with CORS headers and nothing else.
///
/// Meant for the spot where the router found no matching route or method: `OPTIONS` requests get
/// `204 No Content` and everything else gets `404 Not Found`. Both carry the same headers the
/// [`Cors`](crate::Cors) middleware would add. It never forwards to another service.
///
/// ```
/// use actix_cors_preflight::CorsFallback;
/// use actix_web::App;
///
/// let app = App::new().default_service(CorsFallback::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CorsFallback {
    policy: Arc<Policy>,
}

impl CorsFallback {
    /// Resolves `opts` and builds the fallback service.
    pub fn new(opts: CorsOptions) -> Self {
        Self::from_policy(Policy::new(opts))
    }

    /// Builds the fallback service around an already resolved policy.
    pub fn from_policy(policy: impl Into<Arc<Policy>>) -> Self {
        Self {
            policy: policy.into(),
        }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

impl ServiceFactory<ServiceRequest> for CorsFallback {
    type Response = ServiceResponse;
    type Error = Error;
    type Config = ();
    type Service = CorsFallback;
    type InitError = ();
    type Future = Ready<Result<Self::Service, Self::InitError>>;

    fn new_service(&self, _: ()) -> Self::Future {
        ready(Ok(self.clone()))
    }
}

impl Service<ServiceRequest> for CorsFallback {
    type Response = ServiceResponse;
    type Error = Error;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    actix_service::always_ready!();

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let cors_headers = self.policy.cors_headers(req.headers());

        let status = if req.method() == Method::OPTIONS {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::NOT_FOUND
        };

        debug!("fallback answering {} {} with {}", req.method(), req.path(), status);

        let res = short_circuit(&cors_headers, status);
        ready(Ok(req.into_response(res)))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{
        http::header,
        test::{self, TestRequest},
    };

    use super::*;

    #[actix_web::test]
    async fn preflight_is_no_content() {
        let srv = CorsFallback::default();

        let req = TestRequest::default()
            .method(Method::OPTIONS)
            .insert_header((header::ORIGIN, "https://www.example.com"))
            .to_srv_request();
        let resp = test::call_service(&srv, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://www.example.com"
        );
    }

    #[actix_web::test]
    async fn other_methods_are_not_found() {
        let srv = CorsFallback::default();

        for method in [Method::GET, Method::POST, Method::DELETE, Method::HEAD] {
            let req = TestRequest::default().method(method).to_srv_request();
            let resp = test::call_service(&srv, req).await;

            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                "*"
            );

            let body = test::read_body(resp).await;
            assert!(body.is_empty());
        }
    }

    #[actix_web::test]
    async fn new_service_yields_same_policy() {
        let factory = CorsFallback::new(CorsOptions::new().allow_credentials(true));
        let srv = factory.new_service(()).await.unwrap();

        assert!(std::ptr::eq(factory.policy(), srv.policy()));
    }
}
