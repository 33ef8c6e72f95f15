use super::*;
use crate::error::{Error, Result};
use rand_distr::StandardNormal;
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::f64::consts::{E, PI};

/// Plain (mean, standard deviation) pair, as informed by configuration
/// files. Converting it into a Normal validates the standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianParams {

    pub mean : f64,

    pub std : f64

}

/// Univariate normal density parametrized by its mean and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GaussianParams", into = "GaussianParams")]
pub struct Normal {

    mean : f64,

    // Always strictly positive unless built with new_unchecked.
    std : f64

}

impl Normal {

    /// Builds the density, rejecting non-finite means and standard deviations
    /// that are not strictly positive (which would make the density evaluate
    /// to infinity or NaN at every point).
    pub fn new(mean : f64, std : f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(Error::InvalidParameter { name : "mean", value : mean });
        }
        if !std.is_finite() || std <= 0.0 {
            return Err(Error::InvalidParameter { name : "std", value : std });
        }
        Ok(Self { mean, std })
    }

    /// Builds the density without validating the parameters. A zero standard
    /// deviation is evaluated as the point-mass limit: +inf at the mean and
    /// zero elsewhere.
    pub fn new_unchecked(mean : f64, std : f64) -> Self {
        Self { mean, std }
    }

    pub fn standard() -> Self {
        Self { mean : 0.0, std : 1.0 }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }

    pub fn var(&self) -> f64 {
        self.std.powi(2)
    }

    /// Differential entropy, in nats: 0.5 ln(2 pi e sigma^2). This is the value
    /// the average negative log-likelihood of samples drawn from self converges to.
    pub fn entropy(&self) -> f64 {
        0.5 * (2. * PI * E * self.var()).ln()
    }

    /// Expected negative log-likelihood under other of samples drawn from self.
    pub fn cross_entropy(&self, other : &Normal) -> f64 {
        0.5 * (2. * PI * other.var()).ln() +
            (self.var() + (self.mean - other.mean).powi(2)) / (2. * other.var())
    }

    /// KL(self || other) in closed form. Non-negative, and zero only when
    /// both parameter pairs are equal.
    pub fn kl_divergence(&self, other : &Normal) -> f64 {
        (other.std / self.std).ln() +
            (self.var() + (self.mean - other.mean).powi(2)) / (2. * other.var()) - 0.5
    }

}

impl Density for Normal {

    fn prob(&self, x : f64) -> f64 {
        if self.std == 0.0 {
            return if x == self.mean { f64::INFINITY } else { 0.0 };
        }
        (1. / (self.std * (2. * PI).sqrt())) *
            (-0.5 * ((x - self.mean) / self.std).powi(2)).exp()
    }

    fn log_prob(&self, x : f64) -> f64 {
        if self.std == 0.0 {
            return self.prob(x).ln();
        }
        -self.std.ln() - 0.5 * (2. * PI).ln() - 0.5 * ((x - self.mean) / self.std).powi(2)
    }

    fn sample<R>(&self, rng : &mut R) -> f64
        where R : Rng + ?Sized
    {
        let z : f64 = rng.sample(StandardNormal);
        self.mean + self.std * z
    }

    // (total * scale) * kernel, in this order, so prefix products round the
    // same way as the article's inline loops.
    fn scale_likelihood(&self, total : f64, x : f64) -> f64 {
        if self.std == 0.0 {
            return total * self.prob(x);
        }
        total * (1. / (self.std * (2. * PI).sqrt())) *
            (-0.5 * ((x - self.mean) / self.std).powi(2)).exp()
    }

}

impl TryFrom<GaussianParams> for Normal {

    type Error = Error;

    fn try_from(p : GaussianParams) -> Result<Self> {
        Normal::new(p.mean, p.std)
    }

}

impl From<Normal> for GaussianParams {

    fn from(n : Normal) -> Self {
        GaussianParams { mean : n.mean, std : n.std }
    }

}

/// Evaluates the normal density with the informed parameters at x.
pub fn density(x : f64, params : &Normal) -> f64 {
    params.prob(x)
}
