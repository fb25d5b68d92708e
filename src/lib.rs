//! BESS Quote Builder: facility peak-demand estimation, battery storage
//! quoting, benchmark validation and margin rendering.

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod margin;
pub mod pipeline;
pub mod power;
pub mod quote;
pub mod repo;
pub mod telemetry;
pub mod validator;
