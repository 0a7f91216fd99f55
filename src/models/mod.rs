//! Domain models for the campaign strategist.
//!
//! # Core Concepts
//!
//! - [`CampaignDetails`]: a single content-creation request submitted by a client.
//!   Validated on arrival, never stored.
//! - [`ActionPlan`]: the structured requirements produced by the strategist before
//!   any downstream generation stage runs.
//! - [`AgentResponse`]: the success/error envelope every campaign reply uses.
//!
//! Nothing here outlives a single HTTP request.

mod campaign;
mod plan;
mod response;

pub use campaign::*;
pub use plan::*;
pub use response::*;
