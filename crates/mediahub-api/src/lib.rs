//! MediaHub API Library
//!
//! HTTP handlers, error rendering and application setup for the media
//! metadata service.

mod api_doc;
pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
mod utils;

pub use error::{HttpAppError, ValidatedJson};
pub use mediahub_infra::ErrorResponse;
pub use state::AppState;
