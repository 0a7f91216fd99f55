//! Campaign intake backend.
//!
//! Accepts a campaign brief (screenshot, document or link), extracts its text,
//! and derives the product, audience and research keywords that the downstream
//! content stages start from.

pub mod api;
pub mod config;
pub mod manager;
pub mod models;
pub mod strategist;
