mod api;
mod element;
mod error;
mod interop;
mod logging;

pub use api::*;
pub use element::HandleElement;
pub use logging::init_logging;
