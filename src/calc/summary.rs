use crate::config::ArticleConfig;
use crate::distr::*;
use crate::error::Result;
use serde::{Serialize, Deserialize};

/// Renders a likelihood with a two-decimal mantissa and its power of ten,
/// e.g. 2.1551e-16 as "2.16 x 10^-16". Non-finite values are rendered as is.
pub fn format_likelihood(v : f64) -> String {
    if !v.is_finite() {
        return format!("{}", v);
    }
    let sci = format!("{:.2e}", v);
    match sci.split_once('e') {
        Some((mantissa, exp)) => format!("{} x 10^{}", mantissa, exp),
        None => sci
    }
}

/// Total likelihood of the article's sample under one candidate distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodSummary {

    pub label : String,

    pub total : f64,

    pub formatted : String

}

impl LikelihoodSummary {

    pub fn new<D>(label : &str, samples : &[f64], distr : &D) -> Self
    where
        D : Density
    {
        let total = distr.joint_prob(samples);
        Self { label : label.to_string(), total, formatted : format_likelihood(total) }
    }

}

fn normal_label(n : &Normal) -> String {
    format!("N({}, {})", n.mean(), n.std())
}

/// Compares every candidate the article shows against the sample: the true
/// distribution, the mixture, the extra single normals and the guess.
pub fn summarize(config : &ArticleConfig) -> Result<Vec<LikelihoodSummary>> {
    let samples = config.samples.as_slice();
    let truth = &config.distributions.truth;
    let mut rows = Vec::new();
    rows.push(LikelihoodSummary::new(&format!("true {}", normal_label(truth)), samples, truth));
    rows.push(LikelihoodSummary::new("mixture", samples, &config.mixture()?));
    for c in config.candidates.iter() {
        rows.push(LikelihoodSummary::new(&normal_label(c), samples, c));
    }
    let guess = &config.distributions.guess;
    rows.push(LikelihoodSummary::new(&format!("guess {}", normal_label(guess)), samples, guess));
    Ok(rows)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn scientific_labels() {
        assert_eq!(format_likelihood(2.1551015720964012e-16), "2.16 x 10^-16");
        assert_eq!(format_likelihood(1.0), "1.00 x 10^0");
        assert_eq!(format_likelihood(0.0), "0.00 x 10^0");
        assert_eq!(format_likelihood(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn true_distribution_explains_sample_best() {
        let rows = summarize(&ArticleConfig::default()).unwrap();
        assert_eq!(rows.len(), 6);
        let best = rows.iter().fold(0.0, |b : f64, r| b.max(r.total) );
        assert_eq!(best, rows[0].total);
        assert_eq!(rows[0].formatted, "2.16 x 10^-16");
    }

}
