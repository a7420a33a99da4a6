use crate::errors::ServerError;
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

pub use crate::errors::ResultResp;

/// Convert a ServerError into an HTML error page with the matching status.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        error!(%err, status, "request failed");
    } else {
        warn!(%err, status, "request rejected");
    }

    let markup = error_page(status, &err.to_string());

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(markup.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
