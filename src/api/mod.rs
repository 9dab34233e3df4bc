//! HTTP API module for the rate engine.
//!
//! This module exposes the rate card, rate inheritance, the basic rate and
//! standalone calculators, and resource costing as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculatorRequest, CostResourceRequest, ResolveRateRequest};
pub use response::{
    ApiError, ApiErrorResponse, BasicRateResponse, ResolveRateResponse, RolesResponse,
};
pub use state::AppState;
