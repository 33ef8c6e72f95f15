use nalgebra::DVector;
use crate::distr::*;
use crate::error::{Error, Result};
use serde::{Serialize, Deserialize};

/// Total likelihoods of the candidate distributions and their scientific labels.
pub mod summary;

pub use summary::*;

/// A density sampled over an evenly-spaced domain, ready to be plotted.
/// Both vectors always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {

    pub x : DVector<f64>,

    pub y : DVector<f64>

}

impl Curve {

    /// Partitions [x_min, x_max] into num_points steps of (x_max - x_min) / num_points
    /// and evaluates the density at each of the num_points + 1 positions x_min + i*step.
    /// The last position is not clamped, so it might exceed x_max by rounding.
    pub fn generate<D>(distr : &D, x_min : f64, x_max : f64, num_points : usize) -> Result<Self>
    where
        D : Density
    {
        if num_points == 0 || !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
            return Err(Error::InvalidDomain { min : x_min, max : x_max, points : num_points });
        }
        let step = (x_max - x_min) / num_points as f64;
        let x = DVector::from_fn(num_points + 1, |i, _| x_min + i as f64 * step );
        let y = x.map(|x| distr.prob(x) );
        tracing::debug!(points = x.nrows(), x_min, x_max, "generated density curve");
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    /// Iterates over the (x, y) pairs.
    pub fn points<'a>(&'a self) -> impl Iterator<Item=(f64, f64)> + 'a {
        self.x.iter().cloned().zip(self.y.iter().cloned())
    }

    /// Trapezoidal approximation of the area under the curve.
    pub fn area(&self) -> f64 {
        let mut area = 0.0;
        for i in 1..self.len() {
            area += 0.5 * (self.y[i] + self.y[i-1]) * (self.x[i] - self.x[i-1]);
        }
        area
    }

}

/// Density curve of the normal with the informed parameters.
pub fn generate_curve(params : &Normal, x_min : f64, x_max : f64, num_points : usize) -> Result<Curve> {
    Curve::generate(params, x_min, x_max, num_points)
}

/// Sample point drawn over a density curve, at the height the density
/// assigns to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {

    /// One-based position of the point in its sample, rendered as x_label.
    pub label : usize,

    pub x : f64,

    pub y : f64

}

/// Places every sample point at its density under distr.
pub fn sample_markers<D>(samples : &[f64], distr : &D) -> Vec<Marker>
where
    D : Density
{
    samples.iter().enumerate()
        .map(|(i, x)| Marker { label : i + 1, x : *x, y : distr.prob(*x) })
        .collect()
}
