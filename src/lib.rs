/// Normal densities (single and mixed) and the Density trait every computation
/// is generic over.
pub mod distr;

/// Density curves over evenly-spaced domains, sample markers and likelihood summaries.
pub mod calc;

/// Ordered sample sequences and sets of independent trials.
pub mod sample;

/// Prefix likelihoods of sample sequences, per-trial trajectory pairs and the
/// trial averages whose gap estimates the KL divergence.
pub mod likelihood;

/// Constants injected into the computations (sample, distributions, plot ranges,
/// trial generation), loaded from and saved to JSON.
pub mod config;

/// Slider/animation state machine and the clock that drives it.
pub mod playback;

/// CSV output of the computed series.
pub mod table;

mod error;

pub use error::{Error, Result};
