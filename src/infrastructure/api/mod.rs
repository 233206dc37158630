//! CareConnect backend adapter.

mod client;
mod dto;

pub use client::{CareConnectClient, DEFAULT_BASE_URL};
