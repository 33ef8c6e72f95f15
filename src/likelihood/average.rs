use super::*;
use nalgebra::DMatrix;
use crate::sample::TrialSet;

/// For each prefix length i in 1..=n, averages log(likelihood_i) / i across the
/// trials. When the trials were drawn from the evaluated distribution this is a
/// Monte Carlo estimate of the negative entropy; otherwise, of the negative
/// cross-entropy.
pub fn average_trajectories<T>(trials : &[T], n : usize) -> Result<DVector<f64>>
where
    T : LogTrajectory
{
    if trials.is_empty() {
        return Err(Error::EmptyTrialSet);
    }

    // Steps over rows, trials over columns.
    let mut per_sample = DMatrix::<f64>::zeros(n, trials.len());
    for (j, traj) in trials.iter().enumerate() {
        if traj.len() < n {
            return Err(Error::PrefixOutOfRange { n, len : traj.len() });
        }
        for i in 0..n {
            let log_lik = traj.log_at(i + 1).ok_or(Error::PrefixOutOfRange { n, len : traj.len() })?;
            per_sample[(i, j)] = log_lik / (i + 1) as f64;
        }
    }
    Ok(per_sample.column_mean())
}

/// One step of the paired convergence curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageStep {

    pub n : usize,

    pub avg_log_true : f64,

    pub avg_log_guess : f64

}

impl AverageStep {

    /// avg_log_true - avg_log_guess: the running KL divergence estimate.
    pub fn gap(&self) -> f64 {
        self.avg_log_true - self.avg_log_guess
    }

}

/// Average per-sample log-likelihood of the true and guess distributions over a
/// set of trials. As n and the number of trials grow, avg_log_true approaches
/// -H(P_true), avg_log_guess approaches -H(P_true, P_guess), and their gap
/// approaches KL(P_true || P_guess).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageTrajectory {

    steps : Vec<AverageStep>

}

impl AverageTrajectory {

    /// Averages both trajectory sets, which should come from the same trials.
    pub fn paired<T, G>(true_trials : &[T], guess_trials : &[G], n : usize) -> Result<Self>
    where
        T : LogTrajectory,
        G : LogTrajectory
    {
        let avg_true = average_trajectories(true_trials, n)?;
        let avg_guess = average_trajectories(guess_trials, n)?;
        let steps = avg_true.iter().zip(avg_guess.iter()).enumerate()
            .map(|(i, (t, g))| AverageStep { n : i + 1, avg_log_true : *t, avg_log_guess : *g })
            .collect();
        Ok(Self { steps })
    }

    /// Evaluates the first n observations of every trial against both distributions
    /// on the log scale, then averages. Working with running log sums avoids
    /// the underflow of the likelihood product at long horizons.
    pub fn from_trials<P, Q>(trials : &TrialSet, p_true : &P, p_guess : &Q, n : usize) -> Result<Self>
    where
        P : Density,
        Q : Density
    {
        let mut true_trajs = Vec::with_capacity(trials.len());
        let mut guess_trajs = Vec::with_capacity(trials.len());
        for samples in trials.iter() {
            true_trajs.push(LogLikelihoodTrajectory::accumulate(samples, p_true, n)?);
            guess_trajs.push(LogLikelihoodTrajectory::accumulate(samples, p_guess, n)?);
        }
        let avg = Self::paired(&true_trajs[..], &guess_trajs[..], n)?;
        tracing::debug!(trials = trials.len(), n, kl = ?avg.kl_estimate(), "averaged trial log-likelihoods");
        Ok(avg)
    }

    pub fn steps(&self) -> &[AverageStep] {
        &self.steps[..]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The gap at the longest prefix, or None for an empty trajectory.
    pub fn kl_estimate(&self) -> Option<f64> {
        self.steps.last().map(|s| s.gap() )
    }

}

/// Reference line the article draws next to the averaged curves: the total
/// log-likelihood gap expected after n samples, -KL * n.
pub fn theoretical_gap(kl : f64, n : usize) -> f64 {
    -kl * n as f64
}
