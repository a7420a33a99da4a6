pub mod errors;
pub mod html;
pub mod redirect;
pub mod text;

// These two *are* in responses/errors.rs
pub use errors::{error_to_response, ResultResp};

pub use html::html_response;
pub use redirect::see_other;
pub use text::{json_response, text_response};
