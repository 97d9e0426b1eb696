//! Trip Wizard: multi-step travel profile wizard with itinerary rendering.

pub mod client;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod print;
pub mod render;
pub mod server;
pub mod terminal;
pub mod wizard;
