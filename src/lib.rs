pub mod api;
pub mod client;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod itinerary;
pub mod region;
pub mod server;
