// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{QubitId, ShorError};
pub use state::StateVector;

pub mod constants;
pub use constants::shor_constants::{
    DEFAULT_COUNTING_WIDTH, DEFAULT_SEED, DEFAULT_SHOTS, DISPLAY_COUNTING_WIDTH,
    EXTENDED_COUNTING_WIDTH, MAX_SIMULATED_QUBITS, PI,
};
