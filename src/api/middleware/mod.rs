pub mod errors;
pub mod logging;

pub use errors::{catch_panic, missing_route, translate_errors};
pub use logging::logging_middleware;
