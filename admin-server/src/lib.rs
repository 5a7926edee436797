//! BusGo admin dashboard server.
//!
//! A server-rendered back office for a bus-ticketing platform: trip and
//! transit-point management, booking and revenue overviews, and withdrawal
//! handling. All data lives behind a remote REST gateway; this server keeps
//! only short-lived editing state of its own.

pub mod domain;
pub mod editor;
pub mod gateway;
pub mod payments;
pub mod web;
