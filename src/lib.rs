//! Hook Relay - Webhook forwarding for local development.
//!
//! This crate relays webhook calls received on stable public URLs to the
//! owning user's live WebSocket connection, where a reflector replays them
//! against a local target.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
