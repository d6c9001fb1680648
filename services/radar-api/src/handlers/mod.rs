//! HTTP request handlers for the radar API.
//!
//! - `health`: landing message and health check
//! - `radar`: latest record and rendered frame
//! - `metrics`: Prometheus exposition

pub mod health;
pub mod metrics;
pub mod radar;
