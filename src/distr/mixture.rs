use super::*;
use crate::error::{Error, Result};
use serde::{Serialize, Deserialize};

/// One normal density with its mixing weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixtureComponent {

    pub params : Normal,

    pub weight : f64

}

impl MixtureComponent {

    pub fn new(params : Normal, weight : f64) -> Self {
        Self { params, weight }
    }

}

/// Weighted sum of the component densities at x. No normalization is
/// applied: the mixture integrates to one only when the informed weights
/// sum to one.
pub fn mixture_density(x : f64, components : &[MixtureComponent]) -> f64 {
    components.iter().fold(0.0, |p, c| p + density(x, &c.params) * c.weight )
}

/// A mixture is a linear combination of normal densities, which models a
/// sample where each observation was generated by one of a few mutually-exclusive
/// processes, without knowing which. The article uses it to show a candidate
/// distribution that explains the sample worse than a single well-placed normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalMixture {

    components : Vec<MixtureComponent>

}

impl NormalMixture {

    /// Builds the mixture from a non-empty set of components with finite,
    /// non-negative weights. The weights are not required to sum to one.
    pub fn new(components : Vec<MixtureComponent>) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::EmptyMixture);
        }
        if let Some(c) = components.iter().find(|c| !c.weight.is_finite() || c.weight < 0.0 ) {
            return Err(Error::InvalidWeight(c.weight));
        }
        Ok(Self { components })
    }

    pub fn components(&self) -> &[MixtureComponent] {
        &self.components[..]
    }

    pub fn total_weight(&self) -> f64 {
        self.components.iter().map(|c| c.weight ).sum()
    }

}

impl Density for NormalMixture {

    fn prob(&self, x : f64) -> f64 {
        mixture_density(x, &self.components[..])
    }

    // Selects a component by walking the cumulative weights, then draws
    // from the selected normal.
    fn sample<R>(&self, rng : &mut R) -> f64
        where R : Rng + ?Sized
    {
        let u : f64 = rng.gen::<f64>() * self.total_weight();
        let mut cumulative = 0.0;
        for c in self.components.iter() {
            cumulative += c.weight;
            if u < cumulative {
                return c.params.sample(rng);
            }
        }
        self.components[self.components.len() - 1].params.sample(rng)
    }

}
