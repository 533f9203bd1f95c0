//! Remote document access
//!
//! The backend this client talks to may implement one of several
//! mutually incompatible contracts: a JSON REST service rooted at
//! `/docs` or `/api/docs`, or a legacy form/redirect service (`/list`,
//! form-POST to `/` and `/update`). [`DocClient`] resolves the live
//! dialect per operation by probing candidates in a fixed order and
//! falling back on 404 responses only; any other failure surfaces
//! immediately.

mod client;
mod dialect;
mod error;
mod record;
mod transport;

pub use client::DocClient;
pub use error::{ApiError, ApiResult};
