use std::{
    future::{ready, Ready},
    sync::Arc,
};

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{Payload, Service, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::{Method, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};
use derive_more::{Display, Error as DeriveError};
use futures_util::future::{FutureExt as _, LocalBoxFuture};
use log::debug;

use crate::{CorsHeaders, Policy};

/// Service wrapper that adds CORS headers and short-circuits preflight requests.
///
/// Created by the [`Cors`](crate::Cors) factory.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct CorsMiddleware<S> {
    pub(crate) service: S,
    pub(crate) policy: Arc<Policy>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,

    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let cors_headers = self.policy.cors_headers(req.headers());

        if req.method() == Method::OPTIONS {
            debug!("preflight request; inner service is not called");
            let res = short_circuit(&cors_headers, StatusCode::NO_CONTENT);
            return ready(Ok(req.into_response(res).map_into_right_body())).boxed_local();
        }

        req.extensions_mut().insert(cors_headers.clone());

        let fut = self.service.call(req);

        async move {
            match fut.await {
                Ok(mut res) => {
                    cors_headers.apply_missing(res.headers_mut());
                    Ok(res.map_into_left_body())
                }

                // the error is rendered later; attach the headers to the response it will become
                Err(err) => {
                    let mut res = err.as_response_error().error_response();
                    cors_headers.apply_missing(res.headers_mut());
                    res.head_mut().set_camel_case_headers(true);
                    Err(InternalError::from_response(err, res).into())
                }
            }
        }
        .boxed_local()
    }
}

/// Builds an empty-bodied response carrying `cors_headers`.
pub(crate) fn short_circuit(cors_headers: &CorsHeaders, status: StatusCode) -> HttpResponse {
    let mut res = HttpResponse::new(status);
    cors_headers.apply(res.headers_mut());
    res.head_mut().set_camel_case_headers(true);
    res
}

impl FromRequest for CorsHeaders {
    type Error = CorsHeadersExtractionError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CorsHeaders>()
                .cloned()
                .ok_or(CorsHeadersExtractionError { _priv: () }),
        )
    }
}

/// Error returned by the [`CorsHeaders`] extractor when the request did not pass through the
/// [`Cors`](crate::Cors) middleware.
#[derive(Debug, Display, DeriveError)]
#[display("CORS headers were not found in request extensions; is the `Cors` middleware registered?")]
pub struct CorsHeadersExtractionError {
    _priv: (),
}

impl ResponseError for CorsHeadersExtractionError {}
