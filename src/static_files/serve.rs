use httpdate::fmt_http_date;
use tokio::fs;

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::static_files::conditional::is_not_modified;
use crate::static_files::{Resource, ResourceOutcome};

/// Builds the response for a parsed request and its resolved outcome.
///
/// The `Connection` header is not set here; it depends on the keep-alive
/// decision made by the connection.
pub async fn respond(req: &Request, outcome: ResourceOutcome) -> Response {
    let status = match outcome {
        ResourceOutcome::Served(resource) => return serve_resource(req, &resource).await,
        ResourceOutcome::NotFound => StatusCode::NotFound,
        ResourceOutcome::Forbidden => StatusCode::Forbidden,
        ResourceOutcome::UnsupportedType => StatusCode::UnsupportedMediaType,
        ResourceOutcome::IoError => StatusCode::InternalServerError,
    };

    Response::error_with_version(status, req.version)
}

async fn serve_resource(req: &Request, resource: &Resource) -> Response {
    let last_modified = fmt_http_date(resource.modified);

    if is_not_modified(resource.modified, req.header("If-Modified-Since")) {
        return ResponseBuilder::standard(StatusCode::NotModified)
            .version(req.version)
            .header("Content-Length", "0")
            .header("Last-Modified", last_modified)
            .build();
    }

    let builder = ResponseBuilder::standard(StatusCode::Ok)
        .version(req.version)
        .header("Content-Type", resource.mime_type.as_str());

    match req.method {
        Method::HEAD => builder
            .header("Content-Length", resource.size.to_string())
            .header("Last-Modified", last_modified)
            .build(),
        Method::GET => match fs::read(&resource.path).await {
            Ok(body) => builder
                .header("Content-Length", body.len().to_string())
                .header("Last-Modified", last_modified)
                .body(body)
                .build(),
            Err(e) => {
                tracing::warn!(
                    path = %resource.path.display(),
                    error = %e,
                    "failed to read file"
                );
                Response::error_with_version(StatusCode::InternalServerError, req.version)
            }
        },
    }
}
