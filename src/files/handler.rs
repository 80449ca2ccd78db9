use bytes::Bytes;
use thiserror::Error;

use crate::config::Config;
use crate::files::resolver::{ResolveError, Resolver};
use crate::http::request::{Method, Request};
use crate::http::response::Response;

#[derive(Debug, Error)]
pub enum HandleError {
    /// Anything other than GET.
    #[error("unsupported method {0:?}")]
    UnsupportedMethod(String),

    #[error(transparent)]
    Resource(#[from] ResolveError),
}

/// Serves GET requests from a document root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    resolver: Resolver,
    distinguish_not_found: bool,
}

impl StaticFiles {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            distinguish_not_found: false,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Resolver::new(&cfg.document_root)).distinguish_not_found(cfg.distinguish_not_found)
    }

    /// Answer missing files with 404 instead of 400.
    pub fn distinguish_not_found(mut self, enabled: bool) -> Self {
        self.distinguish_not_found = enabled;
        self
    }

    pub async fn handle(&self, request: &Request) -> Result<Response, HandleError> {
        if request.known_method() != Some(Method::GET) {
            return Err(HandleError::UnsupportedMethod(request.method.clone()));
        }

        let resolved = self.resolver.resolve(&request.path).await?;

        let contents = tokio::fs::read(&resolved.path).await.map_err(|e| {
            tracing::debug!(path = %resolved.path.display(), error = %e, "File not readable");
            ResolveError::NotFound
        })?;

        Ok(Response::file(resolved.content_type, Bytes::from(contents)))
    }

    /// The response sent for a handling failure.
    pub fn error_response(&self, err: &HandleError) -> Response {
        match err {
            HandleError::Resource(ResolveError::NotFound) if self.distinguish_not_found => {
                Response::not_found()
            }
            _ => Response::bad_request(),
        }
    }
}
