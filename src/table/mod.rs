/// Plain-text tables of the computed series, one row per plotted point,
/// for consumption by a charting front end.
pub mod csv;

pub use self::csv::*;
