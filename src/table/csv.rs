use ::csv;
use std::io::Write;
use serde::Serialize;
use crate::calc::{Curve, Marker};
use crate::error::Result;
use crate::likelihood::{AverageTrajectory, LikelihoodTrajectory, LogLikelihoodTrajectory};

#[derive(Serialize)]
struct PointRow {
    x : f64,
    y : f64
}

#[derive(Serialize)]
struct PairRow {
    n : usize,
    #[serde(rename = "true")]
    truth : f64,
    guess : f64
}

fn write_rows<W, I, T>(writer : W, rows : I) -> Result<()>
where
    W : Write,
    I : IntoIterator<Item=T>,
    T : Serialize
{
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the curve as x,y rows.
pub fn write_curve<W>(curve : &Curve, writer : W) -> Result<()>
where
    W : Write
{
    write_rows(writer, curve.points().map(|(x, y)| PointRow { x, y }))
}

/// Writes the sample markers as label,x,y rows.
pub fn write_markers<W>(markers : &[Marker], writer : W) -> Result<()>
where
    W : Write
{
    write_rows(writer, markers.iter())
}

/// Writes two trajectories over the same prefixes side by side as n,true,guess rows.
/// Rows stop at the shorter trajectory.
pub fn write_likelihoods<W>(truth : &LikelihoodTrajectory, guess : &LikelihoodTrajectory, writer : W) -> Result<()>
where
    W : Write
{
    let rows = truth.points().zip(guess.points())
        .map(|((n, t), (_, g))| PairRow { n, truth : t, guess : g });
    write_rows(writer, rows)
}

/// Same as write_likelihoods, on the log scale.
pub fn write_log_likelihoods<W>(truth : &LogLikelihoodTrajectory, guess : &LogLikelihoodTrajectory, writer : W) -> Result<()>
where
    W : Write
{
    let rows = truth.points().zip(guess.points())
        .map(|((n, t), (_, g))| PairRow { n, truth : t, guess : g });
    write_rows(writer, rows)
}

/// Writes the averaged convergence curve as n,avg_log_true,avg_log_guess rows.
pub fn write_average<W>(avg : &AverageTrajectory, writer : W) -> Result<()>
where
    W : Write
{
    write_rows(writer, avg.steps().iter())
}
