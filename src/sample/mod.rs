use crate::distr::*;
use crate::error::{Error, Result};
use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::Index;

/// Ordered sequence of observations, semantically independent draws from a
/// generating distribution. The order is fixed once the sequence is built,
/// since it determines which points enter each prefix likelihood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleSequence {

    points : Vec<f64>

}

impl SampleSequence {

    pub fn new(points : Vec<f64>) -> Self {
        Self { points }
    }

    /// Draws len independent observations from distr.
    pub fn draw<D, R>(distr : &D, len : usize, rng : &mut R) -> Self
    where
        D : Density,
        R : Rng + ?Sized
    {
        let points = (0..len).map(|_| distr.sample(rng) ).collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.points[..]
    }

    /// The first n observations; None when the sequence is shorter than n.
    pub fn prefix(&self, n : usize) -> Option<&[f64]> {
        self.points.get(0..n)
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item=&'a f64> + 'a {
        self.points.iter()
    }

}

impl Index<usize> for SampleSequence {

    type Output = f64;

    fn index(&self, ix : usize) -> &f64 {
        &self.points[ix]
    }

}

impl From<Vec<f64>> for SampleSequence {

    fn from(points : Vec<f64>) -> Self {
        Self::new(points)
    }

}

impl From<&[f64]> for SampleSequence {

    fn from(points : &[f64]) -> Self {
        Self::new(points.to_vec())
    }

}

/// Independent re-samplings of the same experiment. Each trial is evaluated
/// separately, and their log-likelihoods are averaged to estimate expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialSet {

    trials : Vec<SampleSequence>

}

impl TrialSet {

    pub fn new(trials : Vec<SampleSequence>) -> Result<Self> {
        if trials.is_empty() {
            return Err(Error::EmptyTrialSet);
        }
        Ok(Self { trials })
    }

    /// Draws n_trials sequences of len observations each from distr.
    pub fn draw<D, R>(distr : &D, n_trials : usize, len : usize, rng : &mut R) -> Result<Self>
    where
        D : Density,
        R : Rng + ?Sized
    {
        let trials = (0..n_trials).map(|_| SampleSequence::draw(distr, len, rng) ).collect();
        tracing::debug!(trials = n_trials, len, "drew trial set");
        Self::new(trials)
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Length of the shortest trial, which bounds the prefix length that can
    /// be evaluated over the whole set.
    pub fn min_len(&self) -> usize {
        self.trials.iter().map(|t| t.len() ).min().unwrap_or(0)
    }

    pub fn trials(&self) -> &[SampleSequence] {
        &self.trials[..]
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item=&'a SampleSequence> + 'a {
        self.trials.iter()
    }

}
