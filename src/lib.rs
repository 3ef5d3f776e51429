// Library target for the integration tests under tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// tests can import types via `drillbook::catalog::*` / `drillbook::session::*`.
// Most UI code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

pub mod catalog;
pub mod config;
pub mod session;

// Private: only reachable through the binary
mod app;
mod event;
mod telemetry;
mod ui;
