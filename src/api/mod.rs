//! HTTP surface: the liveness routes a hosting platform probes.

pub mod handlers;
pub mod middleware;
pub mod routes;
