use anyhow::{Context, Result};
use klgauss::calc::*;
use klgauss::config::ArticleConfig;
use klgauss::likelihood::*;
use klgauss::playback::{Playback, SliderController, SystemClock};
use klgauss::table;
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;

/// Compute the series behind the KL divergence article from the command line
#[derive(StructOpt, Debug)]
struct Opts {

    /// JSON file overriding the article's constants
    #[structopt(short, long, parse(from_os_str))]
    config : Option<PathBuf>,

    /// Verbosity of the diagnostics written to stderr (error, warn, info, debug, trace)
    #[structopt(long, default_value = "warn")]
    log_level : tracing::Level,

    #[structopt(subcommand)]
    cmd : Command

}

#[derive(StructOpt, Debug)]
enum Command {

    /// Density curve over the configured range, as x,y rows
    Curve {

        /// Plot the guess distribution instead of the true one
        #[structopt(long)]
        guess : bool,

        /// Also write the sample markers to this file
        #[structopt(long, parse(from_os_str))]
        markers : Option<PathBuf>
    },

    /// Curve of the configured two-component mixture
    Mixture,

    /// Prefix likelihoods of the sample under the true and guess distributions
    Likelihood {

        /// Number of sample points considered (defaults to all)
        #[structopt(short)]
        n : Option<usize>,

        /// Write log-likelihoods instead
        #[structopt(long)]
        log : bool
    },

    /// Per-trial likelihood pairs with their palette colours, as JSON
    Trajectories {

        #[structopt(short)]
        n : Option<usize>
    },

    /// Trial-averaged log-likelihood per sample, and the KL estimate
    Average {

        #[structopt(short)]
        n : Option<usize>
    },

    /// Total likelihood of every candidate distribution
    Summary,

    /// Animate the slider on the wall clock, printing n at every tick
    Play {

        /// Starting slider position (defaults to the maximum, which rewinds to zero)
        #[structopt(long)]
        from : Option<usize>
    },

    /// Print the effective configuration as JSON
    Config

}

fn load_config(path : &Option<PathBuf>) -> Result<ArticleConfig> {
    match path {
        Some(p) => ArticleConfig::load_from_path(p)
            .with_context(|| format!("Error loading configuration from {}", p.display())),
        None => Ok(ArticleConfig::default())
    }
}

fn run(cmd : Command, config : ArticleConfig) -> Result<()> {
    let stdout = io::stdout();
    let out = stdout.lock();
    let (x_min, x_max) = config.graph.x_range;
    let num_points = config.graph.num_points;
    let truth = config.distributions.truth;
    let guess = config.distributions.guess;
    match cmd {
        Command::Curve { guess : use_guess, markers } => {
            let distr = if use_guess { guess } else { truth };
            let curve = generate_curve(&distr, x_min, x_max, num_points)?;
            table::write_curve(&curve, out)?;
            if let Some(path) = markers {
                let f = std::fs::File::create(&path)
                    .with_context(|| format!("Error creating {}", path.display()))?;
                table::write_markers(&sample_markers(config.samples.as_slice(), &truth), f)?;
            }
        },
        Command::Mixture => {
            let curve = Curve::generate(&config.mixture()?, x_min, x_max, num_points)?;
            table::write_curve(&curve, out)?;
        },
        Command::Likelihood { n, log } => {
            let n = n.unwrap_or(config.max_n());
            if log {
                let a = LogLikelihoodTrajectory::accumulate(&config.samples, &truth, n)?;
                let b = LogLikelihoodTrajectory::accumulate(&config.samples, &guess, n)?;
                table::write_log_likelihoods(&a, &b, out)?;
            } else {
                let a = accumulate_likelihood(&config.samples, &truth, n)?;
                let b = accumulate_likelihood(&config.samples, &guess, n)?;
                table::write_likelihoods(&a, &b, out)?;
                if let (Some(ta), Some(tb)) = (a.last(), b.last()) {
                    eprintln!("total likelihood of P_true = {}", format_likelihood(ta));
                    eprintln!("total likelihood of P_guess = {}", format_likelihood(tb));
                }
            }
        },
        Command::Trajectories { n } => {
            let trials = config.trial_set()?;
            let n = n.unwrap_or(trials.min_len());
            let pairs = build_trajectories(trials.trials(), &truth, &guess, n)?;
            serde_json::to_writer_pretty(out, &pairs)?;
            println!();
        },
        Command::Average { n } => {
            let trials = config.trial_set()?;
            let n = n.unwrap_or(trials.min_len());
            let avg = AverageTrajectory::from_trials(&trials, &truth, &guess, n)?;
            table::write_average(&avg, out)?;
            if let Some(kl) = avg.kl_estimate() {
                eprintln!(
                    "KL estimate after {} samples over {} trials = {:.3} (closed form {:.3})",
                    n,
                    trials.len(),
                    kl,
                    truth.kl_divergence(&guess)
                );
            }
        },
        Command::Summary => {
            let mut out = out;
            for row in summarize(&config)? {
                writeln!(out, "{}: {}", row.label, row.formatted)?;
            }
        },
        Command::Play { from } => {
            let max_n = config.max_n();
            let mut slider = SliderController::at(max_n, from.unwrap_or(max_n));
            let mut playback = Playback::new(&mut slider, SystemClock, config.tick_interval());
            let mut out = out;
            playback.run(|n| writeln!(out, "n = {}", n).is_ok() );
        },
        Command::Config => {
            config.save(out)?;
            println!();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::from_args();
    tracing_subscriber::fmt()
        .with_max_level(opts.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let config = load_config(&opts.config)?;
    tracing::info!(samples = config.samples.len(), trials = config.trials.count, "configuration loaded");
    run(opts.cmd, config)
}
