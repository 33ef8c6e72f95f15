use rand::Rng;
use std::fmt::Debug;

pub mod normal;

pub use normal::*;

pub mod mixture;

pub use mixture::*;

/// Trait shared by the univariate densities the article plots. Implementors
/// evaluate their probability density at a single point; everything that
/// is built on top of the density (curves, prefix likelihoods, trial
/// averages) is generic over this trait, so the same routine draws a
/// single normal and a normal mixture.
pub trait Density
    where Self : Debug
{

    /// Evaluates the probability density at x.
    fn prob(&self, x : f64) -> f64;

    /// Natural logarithm of the density at x. Implementors should override
    /// this when the log can be computed without going through prob(.),
    /// which underflows far from the mode.
    fn log_prob(&self, x : f64) -> f64 {
        self.prob(x).ln()
    }

    /// Draws a single observation from the density.
    fn sample<R>(&self, rng : &mut R) -> f64
        where R : Rng + ?Sized;

    /// Multiplies a running likelihood total by the density at x. Implementors
    /// may fold the density's factors into total one at a time.
    fn scale_likelihood(&self, total : f64, x : f64) -> f64 {
        total * self.prob(x)
    }

    /// Joint probability of the independent sample y: the product of the
    /// densities, evaluated first and then multiplied in sample order.
    fn joint_prob(&self, y : &[f64]) -> f64 {
        y.iter().fold(1., |jp, y| jp * self.prob(*y))
    }

}
