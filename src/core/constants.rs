//! Constants shared by the circuit model, the simulator and the orchestrator.

/// Configuration defaults for phase estimation runs.
pub mod shor_constants {
    /// Counting register width used by a standard factoring run.
    pub const DEFAULT_COUNTING_WIDTH: usize = 8;
    /// Counting register width of the reduced outline circuit used for diagrams.
    pub const DISPLAY_COUNTING_WIDTH: usize = 3;
    /// Counting register width of the high-resolution variant.
    pub const EXTENDED_COUNTING_WIDTH: usize = 20;
    /// Number of simulated trials per run.
    pub const DEFAULT_SHOTS: u64 = 1024;
    /// Seed for the bundled simulator's sampler.
    pub const DEFAULT_SEED: u64 = 0x5EED;
    /// Largest register the state-vector backend will allocate (2^24 amplitudes).
    pub const MAX_SIMULATED_QUBITS: usize = 24;
    /// Used for phase angles (`e^(iθ)`)
    pub const PI: f64 = std::f64::consts::PI;
}
