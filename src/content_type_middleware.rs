use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorBadRequest, ErrorUnsupportedMediaType},
    http::Method,
    HttpMessage
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::Instrument;

const JSON_ESSENCE: &str = "application/json";

/// Rejects write requests whose body is not declared as JSON.
pub struct ContentTypeGuardFactory;

impl<S> Transform<S, ServiceRequest> for ContentTypeGuardFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future: 'static
{
    type Response = ServiceResponse;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ContentTypeGuard<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ContentTypeGuard{service}))
    }
}

pub struct ContentTypeGuard<S>{
    service: S
}

impl<S> Service<ServiceRequest> for ContentTypeGuard<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future : 'static
{
    type Response = S::Response;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    #[tracing::instrument(
        "Checking request content type",
        skip(self, req),
        fields(method = %req.method(), path = %req.path())
    )]
    fn call(&self, req: ServiceRequest) -> Self::Future {
        let current_span = tracing::Span::current();

        if [Method::POST, Method::PUT, Method::PATCH].contains(req.method()) {
            match req.mime_type() {
                Ok(Some(mime)) if mime.essence_str() == JSON_ESSENCE => {},
                Ok(Some(mime)) => {
                    tracing::warn!(content_type = %mime, "Rejecting non json body");
                    return Box::pin(
                        ready(Err(ErrorUnsupportedMediaType("Unsupported Media Type")))
                            .instrument(current_span)
                    )
                },
                Ok(None) | Err(_) => {
                    tracing::warn!("Rejecting write request without a usable content type");
                    return Box::pin(
                        ready(Err(ErrorBadRequest("Bad Request")))
                            .instrument(current_span)
                    )
                }
            }
        }

        let fut = self.service.call(req);

        Box::pin(
            async move {
                let res = fut.await?;
                Ok(res)
            }
            .instrument(current_span)
        )
    }
}
