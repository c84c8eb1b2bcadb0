//! Translation of request failures into the JSON error envelope

pub mod codes;
pub mod failure;
pub mod response;
pub mod translator;

pub use codes::{status_name, ErrorKind};
pub use failure::{AppError, PendingFailure, Violation};
pub use response::{Enveloped, ErrorResponse};
pub use translator::translate;
