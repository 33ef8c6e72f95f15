use crate::distr::*;
use crate::error::{Error, Result};
use crate::sample::{SampleSequence, TrialSet};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};
use std::fs::OpenOptions;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

/// The fifty observations the article plots, drawn once from N(3, 0.5).
pub const SAMPLE_POINTS : [f64; 50] = [
    3.314, 2.051, 3.11, 2.684, 3.163, 3.271, 2.505, 3.335, 3.225, 3.047,
    3.314, 2.834, 3.286, 3.974, 2.664, 3.173, 2.724, 2.763, 3.055, 2.581,
    3.274, 1.845, 3.017, 2.8, 2.498, 3.457, 3.093, 2.072, 4.175, 2.947,
    3.79, 1.944, 2.789, 3.286, 2.51, 3.426, 2.447, 3.42, 2.436, 3.038,
    3.115, 3.464, 2.337, 2.17, 3.528, 2.872, 3.164, 3.406, 2.888, 2.773
];

/// The distribution that generated the sample, and the candidate compared against it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {

    #[serde(rename = "true")]
    pub truth : Normal,

    pub guess : Normal

}

impl Default for DistributionParams {

    fn default() -> Self {
        Self {
            truth : Normal::new_unchecked(3., 0.5),
            guess : Normal::new_unchecked(4., 0.7)
        }
    }

}

/// Display ranges and resolution of the density plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphSettings {

    pub x_range : (f64, f64),

    pub y_range : (f64, f64),

    pub num_points : usize

}

impl Default for GraphSettings {

    fn default() -> Self {
        Self { x_range : (0., 10.), y_range : (0., 1.), num_points : 100 }
    }

}

/// How the additional sample runs are generated from the true distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialSettings {

    pub count : usize,

    pub len : usize,

    pub seed : u64

}

impl Default for TrialSettings {

    fn default() -> Self {
        Self { count : 10, len : 100, seed : 1 }
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {

    /// Milliseconds between slider increments while playing.
    pub interval_ms : u64

}

impl Default for PlaybackSettings {

    fn default() -> Self {
        Self { interval_ms : 50 }
    }

}

/// Every constant the computations read, injected explicitly rather than read
/// from globals. Fields missing from a configuration file take the article's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleConfig {

    pub samples : SampleSequence,

    pub distributions : DistributionParams,

    pub graph : GraphSettings,

    /// Components of the two-bump candidate shown next to the single normals.
    pub mixture : Vec<MixtureComponent>,

    /// Further single-normal candidates whose total likelihood the article compares.
    pub candidates : Vec<Normal>,

    pub trials : TrialSettings,

    pub playback : PlaybackSettings

}

impl Default for ArticleConfig {

    fn default() -> Self {
        Self {
            samples : SampleSequence::from(&SAMPLE_POINTS[..]),
            distributions : DistributionParams::default(),
            graph : GraphSettings::default(),
            mixture : vec![
                MixtureComponent::new(Normal::new_unchecked(3., 0.5), 0.6),
                MixtureComponent::new(Normal::new_unchecked(5., 0.6), 0.4)
            ],
            candidates : vec![
                Normal::new_unchecked(3.5, 0.5),
                Normal::new_unchecked(3., 0.4),
                Normal::new_unchecked(3., 0.8)
            ],
            trials : TrialSettings::default(),
            playback : PlaybackSettings::default()
        }
    }

}

impl ArticleConfig {

    pub fn load_from_path<P>(path : P) -> Result<Self>
    where
        P : AsRef<Path>
    {
        let f = File::open(path)?;
        Self::load(f)
    }

    pub fn load<R>(mut reader : R) -> Result<Self>
    where
        R : Read
    {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let config : ArticleConfig = serde_json::from_str(&content[..])?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path<P>(&self, path : P) -> Result<()>
    where
        P : AsRef<Path>
    {
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        self.save(file)
    }

    pub fn save<W>(&self, mut writer : W) -> Result<()>
    where
        W : Write
    {
        let content = serde_json::to_string_pretty(&self)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Checks the invariants serde cannot express. Normal parameters are already
    /// validated when deserialized.
    pub fn validate(&self) -> Result<()> {
        if self.samples.is_empty() {
            return Err(Error::EmptySample);
        }
        let (min, max) = self.graph.x_range;
        if self.graph.num_points == 0 || !min.is_finite() || !max.is_finite() || max <= min {
            return Err(Error::InvalidDomain { min, max, points : self.graph.num_points });
        }
        let (y_min, y_max) = self.graph.y_range;
        if !(y_max > y_min) {
            return Err(Error::InvalidParameter { name : "y_range", value : y_max });
        }
        self.mixture()?;
        if self.trials.count == 0 {
            return Err(Error::EmptyTrialSet);
        }
        if self.trials.len == 0 {
            return Err(Error::EmptySample);
        }
        if self.playback.interval_ms == 0 {
            return Err(Error::InvalidParameter { name : "interval_ms", value : 0. });
        }
        Ok(())
    }

    /// Largest slider position: the number of sample points.
    pub fn max_n(&self) -> usize {
        self.samples.len()
    }

    pub fn mixture(&self) -> Result<NormalMixture> {
        NormalMixture::new(self.mixture.clone())
    }

    /// Draws the configured trials from the true distribution. The same seed
    /// always yields the same trials.
    pub fn trial_set(&self) -> Result<TrialSet> {
        let mut rng = StdRng::seed_from_u64(self.trials.seed);
        TrialSet::draw(&self.distributions.truth, self.trials.count, self.trials.len, &mut rng)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.playback.interval_ms)
    }

}
