// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod payment_repository;
pub mod reservation_repository;
pub mod review_repository;
pub mod tour_repository;
pub mod user_repository;

pub use payment_repository::*;
pub use reservation_repository::*;
pub use review_repository::*;
pub use tour_repository::*;
pub use user_repository::*;
