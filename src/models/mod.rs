// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod payment;
pub mod reservation;
pub mod review;
pub mod tour;
pub mod user;

pub use payment::*;
pub use reservation::*;
pub use review::*;
pub use tour::*;
pub use user::*;
