// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod booking_service;
pub mod cache;
pub mod media;
pub mod paypal_client;
pub mod tour_service;

pub use booking_service::*;
pub use cache::*;
pub use paypal_client::*;
pub use tour_service::*;
