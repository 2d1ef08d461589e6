//! DSP — pure Rust additive synthesis.
//!
//! The same code runs in the browser (via WASM) and natively, so the
//! buffer a user hears is bit-identical to the one the tests check.

pub mod mixer;
pub mod oscillator;
pub mod renderer;
pub mod synth;
