use nalgebra::DVector;
use crate::distr::*;
use crate::error::{Error, Result};
use crate::sample::SampleSequence;
use serde::{Serialize, Deserialize};

/// Per-trial likelihood pairs for two competing distributions, and the palette
/// that tells trials apart.
pub mod trajectory;

pub use trajectory::*;

/// Averages of per-sample log-likelihoods across trials, whose gap estimates
/// the KL divergence.
pub mod average;

pub use average::*;

/// Total likelihood of the prefixes of a sample sequence, indexed by the prefix
/// length n = 1..=N. Entry n is the product of the densities of the first n
/// observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodTrajectory {

    values : DVector<f64>

}

/// Natural log of a LikelihoodTrajectory, or equivalently the running sum of
/// log-densities. Built from log-densities it stays finite at prefix lengths
/// where the plain product underflows to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLikelihoodTrajectory {

    values : DVector<f64>

}

/// Trajectories that can be read on the log scale at a given prefix length.
/// Both representations can be averaged across trials.
pub trait LogTrajectory {

    /// Number of prefixes held (the largest n).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Log-likelihood of the prefix of length n (n >= 1).
    fn log_at(&self, n : usize) -> Option<f64>;

}

fn checked_prefix<'a>(samples : &'a SampleSequence, n : usize) -> Result<&'a [f64]> {
    samples.prefix(n).ok_or(Error::PrefixOutOfRange { n, len : samples.len() })
}

/// Evaluates the total likelihood of every prefix of the first n samples under
/// distr. Each prefix product is recomputed from the first sample with
/// Density::scale_likelihood, instead of carried over from the previous prefix,
/// so every entry rounds like a loop that restarts at 1. n = 0 yields an empty
/// trajectory; n larger than the sample is an error.
pub fn accumulate_likelihood<D>(
    samples : &SampleSequence,
    distr : &D,
    n : usize
) -> Result<LikelihoodTrajectory>
where
    D : Density
{
    let prefix = checked_prefix(samples, n)?;
    let values = DVector::from_fn(n, |i, _| {
        prefix[0..=i].iter().fold(1., |total, x| distr.scale_likelihood(total, *x) )
    });
    if values.iter().last().map(|l| *l == 0.0).unwrap_or(false) {
        tracing::warn!(n, "prefix likelihood underflowed to zero");
    }
    tracing::debug!(n, len = samples.len(), "accumulated prefix likelihoods");
    Ok(LikelihoodTrajectory { values })
}

/// Product of the densities of all samples under distr. Densities are evaluated
/// before being multiplied, so for a normal this can differ in the last bits from
/// the final entry of accumulate_likelihood.
pub fn total_likelihood<D>(samples : &SampleSequence, distr : &D) -> f64
where
    D : Density
{
    distr.joint_prob(samples.as_slice())
}

impl LikelihoodTrajectory {

    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Total likelihood of the prefix of length n (n >= 1).
    pub fn at(&self, n : usize) -> Option<f64> {
        n.checked_sub(1).and_then(|i| self.values.get(i).cloned() )
    }

    /// Likelihood of the longest prefix held.
    pub fn last(&self) -> Option<f64> {
        self.at(self.len())
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Iterates over (n, likelihood) pairs, starting at n = 1.
    pub fn points<'a>(&'a self) -> impl Iterator<Item=(usize, f64)> + 'a {
        self.values.iter().enumerate().map(|(i, l)| (i + 1, *l) )
    }

    /// Elementwise natural log. Prefixes that underflowed map to -inf.
    pub fn ln(&self) -> LogLikelihoodTrajectory {
        LogLikelihoodTrajectory { values : self.values.map(|l| l.ln() ) }
    }

}

impl LogLikelihoodTrajectory {

    /// Running sum of the log-densities of the first n samples, computed in a
    /// single pass.
    pub fn accumulate<D>(samples : &SampleSequence, distr : &D, n : usize) -> Result<Self>
    where
        D : Density
    {
        let prefix = checked_prefix(samples, n)?;
        let mut values = DVector::zeros(n);
        let mut running = 0.0;
        for (i, x) in prefix.iter().enumerate() {
            running += distr.log_prob(*x);
            values[i] = running;
        }
        tracing::debug!(n, len = samples.len(), "accumulated prefix log-likelihoods");
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    pub fn at(&self, n : usize) -> Option<f64> {
        n.checked_sub(1).and_then(|i| self.values.get(i).cloned() )
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn points<'a>(&'a self) -> impl Iterator<Item=(usize, f64)> + 'a {
        self.values.iter().enumerate().map(|(i, l)| (i + 1, *l) )
    }

    /// Log-likelihood divided by the prefix length, the per-sample quantity
    /// whose expectation is the negative (cross-)entropy.
    pub fn per_sample(&self) -> DVector<f64> {
        DVector::from_fn(self.len(), |i, _| self.values[i] / (i + 1) as f64 )
    }

    /// Back to the likelihood scale.
    pub fn exp(&self) -> LikelihoodTrajectory {
        LikelihoodTrajectory { values : self.values.map(|l| l.exp() ) }
    }

}

impl LogTrajectory for LikelihoodTrajectory {

    fn len(&self) -> usize {
        self.values.nrows()
    }

    fn log_at(&self, n : usize) -> Option<f64> {
        self.at(n).map(|l| l.ln() )
    }

}

impl LogTrajectory for LogLikelihoodTrajectory {

    fn len(&self) -> usize {
        self.values.nrows()
    }

    fn log_at(&self, n : usize) -> Option<f64> {
        self.at(n)
    }

}

impl From<&LikelihoodTrajectory> for LogLikelihoodTrajectory {

    fn from(traj : &LikelihoodTrajectory) -> Self {
        traj.ln()
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    fn seq() -> SampleSequence {
        SampleSequence::new(vec![3.314, 2.051, 3.11, 2.684, 3.163])
    }

    #[test]
    fn empty_prefix_yields_empty_trajectory() {
        let n = Normal::new(3., 0.5).unwrap();
        let t = accumulate_likelihood(&seq(), &n, 0).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.last(), None);
        assert_eq!(t.at(0), None);
    }

    #[test]
    fn prefix_beyond_sample_is_rejected() {
        let n = Normal::new(3., 0.5).unwrap();
        match accumulate_likelihood(&seq(), &n, 6) {
            Err(Error::PrefixOutOfRange { n, len }) => {
                assert_eq!(n, 6);
                assert_eq!(len, 5);
            },
            other => panic!("Unexpected result {:?}", other)
        }
    }

    #[test]
    fn full_prefix_equals_total() {
        let n = Normal::new(4., 0.7).unwrap();
        let s = seq();
        let t = accumulate_likelihood(&s, &n, s.len()).unwrap();
        let total = total_likelihood(&s, &n);
        assert!((t.last().unwrap() - total).abs() <= 1E-12 * total);
        assert_eq!(t.at(1).unwrap(), n.scale_likelihood(1., s[0]));
    }

    #[test]
    fn log_trajectory_survives_underflow() {
        let n = Normal::new(3., 0.5).unwrap();
        let s = SampleSequence::new(vec![9.0; 40]);
        let t = accumulate_likelihood(&s, &n, 40).unwrap();
        assert_eq!(t.last().unwrap(), 0.0);
        assert_eq!(t.ln().at(40).unwrap(), f64::NEG_INFINITY);
        let lt = LogLikelihoodTrajectory::accumulate(&s, &n, 40).unwrap();
        assert!(lt.at(40).unwrap().is_finite());
        assert!((lt.at(40).unwrap() - 40. * n.log_prob(9.0)).abs() < 1E-9);
    }

}
