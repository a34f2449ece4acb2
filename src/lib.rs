//! Connection Quiz - deterministic connection scoring service
//!
//! The scoring engine in [`core::scoring`] maps quiz answers to a connection
//! count and a rarity percentage. It is pure and total: the same answers
//! always produce the same result and no input is rejected. The HTTP routes,
//! session store and checkout client around it live in [`routes`] and
//! [`services`].

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_connections, compute_rarity, compute_result, score_breakdown};
pub use models::{QuizAnswers, ConnectionResult};
