use crate::config::BasicCredentials;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use actix_web_httpauth::headers::www_authenticate::basic::Basic;
use actix_web_httpauth::headers::www_authenticate::WwwAuthenticate;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::{ok, Ready};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// HTTP Basic gate for the browser-facing routes. API paths are exposed
/// without it, and an unconfigured credential pair leaves the gate open.
#[derive(Clone)]
pub struct BasicAuthGate {
    credentials: Option<BasicCredentials>,
}

impl BasicAuthGate {
    pub fn new(credentials: Option<BasicCredentials>) -> Self {
        Self { credentials }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Transform = BasicAuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BasicAuthGateService {
            service: Arc::new(service),
            credentials: self.credentials.clone(),
        })
    }
}

pub struct BasicAuthGateService<S> {
    service: Arc<S>,
    credentials: Option<BasicCredentials>,
}

#[derive(Debug)]
enum GateError {
    NoAuthHeader,
    NotBasicScheme,
    UndecodableHeader,
    WrongCredentials,
}

impl GateError {
    fn log_message(&self, path: &str) -> String {
        match self {
            GateError::NoAuthHeader => format!("No Authorization header found for path: {}", path),
            GateError::NotBasicScheme => {
                format!("Authorization header for path {} doesn't use the Basic scheme", path)
            }
            GateError::UndecodableHeader => {
                format!("Undecodable Basic authorization header for path: {}", path)
            }
            GateError::WrongCredentials => format!("Wrong credentials for path: {}", path),
        }
    }
}

/// Paths served without a credential check: the API surface and static
/// assets. HTML documents and the root path stay gated.
fn is_gate_exempt(path: &str) -> bool {
    const ASSET_EXTENSIONS: [&str; 10] = [
        ".css", ".js", ".wasm", ".ico", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp",
    ];

    path.starts_with("/api/") || ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Decodes the `Authorization` header as HTTP Basic and compares it against
/// the configured pair. Plain string comparison, not constant-time.
fn check_basic_credentials(
    req: &ServiceRequest,
    expected: &BasicCredentials,
) -> Result<(), GateError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(GateError::NoAuthHeader)?;
    let auth_str = auth_header
        .to_str()
        .map_err(|_| GateError::UndecodableHeader)?;
    let encoded = auth_str
        .strip_prefix("Basic ")
        .ok_or(GateError::NotBasicScheme)?;

    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|_| GateError::UndecodableHeader)?;
    let decoded = String::from_utf8(decoded).map_err(|_| GateError::UndecodableHeader)?;
    let (user, pass) = decoded
        .split_once(':')
        .ok_or(GateError::UndecodableHeader)?;

    if user == expected.username && pass == expected.password {
        Ok(())
    } else {
        Err(GateError::WrongCredentials)
    }
}

impl<S, B> Service<ServiceRequest> for BasicAuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let credentials = self.credentials.clone();

        Box::pin(async move {
            let path_str = req.path().to_string();

            if is_gate_exempt(&path_str) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let expected = match &credentials {
                Some(expected) => expected,
                None => {
                    log::warn!("Basic auth credentials not configured, skipping authentication");
                    let res = service.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
            };

            match check_basic_credentials(&req, expected) {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(gate_error) => {
                    log::warn!("{}", gate_error.log_message(&path_str));

                    let (http_req, _payload) = req.into_parts();
                    let response = HttpResponse::Unauthorized()
                        .insert_header(WwwAuthenticate(Basic::with_realm("Secure Area")))
                        .body("Authentication required")
                        .map_into_right_body();
                    Ok(ServiceResponse::new(http_req, response))
                }
            }
        })
    }
}
