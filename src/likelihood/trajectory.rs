use super::*;
use std::fmt::{self, Display};

/// 8-bit RGB colour assigned to a trajectory line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {

    pub r : u8,

    pub g : u8,

    pub b : u8

}

impl Rgb {

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

}

impl Display for Rgb {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }

}

// Channel that starts at base and grows by span/15 per trial, saturating at 255.
fn channel(base : f64, span : f64, trial : usize) -> u8 {
    (base + (span / 15.) * trial as f64).floor().min(255.) as u8
}

/// Deterministic colours for the trials of a trajectory plot. Colours vary
/// monotonically with the trial index (greens for the true distribution,
/// reds fading into yellow for the guess) and saturate after fifteen trials.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette;

impl Palette {

    pub fn true_color(trial : usize) -> Rgb {
        Rgb { r : 76, g : channel(175., 80., trial), b : channel(80., 175., trial) }
    }

    pub fn guess_color(trial : usize) -> Rgb {
        Rgb { r : 255, g : channel(82., 173., trial), b : 82 }
    }

}

/// Prefix likelihoods of one trial under the two competing distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPair {

    /// Zero-based position of the trial in its set.
    pub trial : usize,

    pub a : LikelihoodTrajectory,

    pub b : LikelihoodTrajectory,

    pub color_a : Rgb,

    pub color_b : Rgb

}

/// Evaluates the first n prefixes of every trial against distr_a and distr_b,
/// preserving trial order. Every trial must hold at least n observations.
pub fn build_trajectories<A, B>(
    trials : &[SampleSequence],
    distr_a : &A,
    distr_b : &B,
    n : usize
) -> Result<Vec<TrajectoryPair>>
where
    A : Density,
    B : Density
{
    let mut pairs = Vec::with_capacity(trials.len());
    for (trial, samples) in trials.iter().enumerate() {
        let a = accumulate_likelihood(samples, distr_a, n)?;
        let b = accumulate_likelihood(samples, distr_b, n)?;
        pairs.push(TrajectoryPair {
            trial,
            a,
            b,
            color_a : Palette::true_color(trial),
            color_b : Palette::guess_color(trial)
        });
    }
    tracing::debug!(trials = trials.len(), n, "built trajectory pairs");
    Ok(pairs)
}
