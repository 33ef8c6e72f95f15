use approx::assert_relative_eq;
use klgauss::calc::*;
use klgauss::config::{ArticleConfig, SAMPLE_POINTS};
use klgauss::distr::*;
use klgauss::likelihood::*;
use klgauss::playback::*;
use klgauss::sample::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::PI;
use std::time::Duration;

const EPS : f64 = 10E-8;

fn fixture() -> SampleSequence {
    SampleSequence::from(&SAMPLE_POINTS[..])
}

fn truth() -> Normal {
    Normal::new(3., 0.5).unwrap()
}

fn guess() -> Normal {
    Normal::new(4., 0.7).unwrap()
}

#[test]
fn density_at_mean() {
    let p = truth();
    assert_relative_eq!(density(3.0, &p), 1. / (0.5 * (2. * PI).sqrt()));
    assert!((density(3.0, &p) - 0.7979).abs() < 1E-4);
}

#[test]
fn density_integrates_to_one() {
    for p in [truth(), guess(), Normal::standard()].iter() {
        let lo = p.mean() - 10. * p.std();
        let hi = p.mean() + 10. * p.std();
        let curve = generate_curve(p, lo, hi, 10_000).unwrap();
        assert!((curve.area() - 1.).abs() < 1E-6);
    }
}

#[test]
fn density_is_symmetric() {
    let p = guess();
    for d in [0.0, 0.1, 0.7, 1.3, 2.9, 6.0].iter() {
        assert_relative_eq!(density(p.mean() + d, &p), density(p.mean() - d, &p), max_relative = 1E-12);
    }
}

#[test]
fn single_component_mixture_equals_density() {
    let p = truth();
    let components = [MixtureComponent::new(p, 1.0)];
    for x in SAMPLE_POINTS.iter() {
        assert_eq!(mixture_density(*x, &components), density(*x, &p));
    }
    let m = NormalMixture::new(components.to_vec()).unwrap();
    assert_eq!(total_likelihood(&fixture(), &m), total_likelihood(&fixture(), &p));
}

#[test]
fn mixture_integrates_to_one() {
    let m = ArticleConfig::default().mixture().unwrap();
    let curve = Curve::generate(&m, -5., 15., 20_000).unwrap();
    assert!((curve.area() - 1.).abs() < 1E-6);
}

#[test]
fn fixture_total_likelihood() {
    let total = total_likelihood(&fixture(), &truth());
    assert_relative_eq!(total, 2.16E-16, max_relative = 0.01);
    assert_eq!(format_likelihood(total), "2.16 x 10^-16");
    let guess_total = total_likelihood(&fixture(), &guess());
    assert!(guess_total < total);
}

#[test]
fn likelihood_decays_monotonically() {
    let s = fixture();
    for p in [truth(), guess()].iter() {
        let traj = accumulate_likelihood(&s, p, s.len()).unwrap();
        assert_eq!(traj.len(), 50);
        let values = traj.values();
        for i in 1..values.nrows() {
            assert!(values[i].abs() <= values[i-1].abs());
        }
    }
}

#[test]
fn log_of_product_is_sum_of_logs() {
    let s = fixture();
    for p in [truth(), guess()].iter() {
        let traj = accumulate_likelihood(&s, p, s.len()).unwrap();
        let log_traj = LogLikelihoodTrajectory::accumulate(&s, p, s.len()).unwrap();
        for n in 1..=s.len() {
            let sum : f64 = s.as_slice()[0..n].iter().map(|x| density(*x, p).ln() ).sum();
            assert_relative_eq!(traj.at(n).unwrap().ln(), sum, max_relative = 1E-9);
            assert_relative_eq!(log_traj.at(n).unwrap(), sum, max_relative = 1E-9);
        }
    }
}

#[test]
fn prefix_products_round_like_inline_loop() {
    let s = fixture();
    for (mean, std) in [(3., 0.5), (4., 0.7)].iter() {
        let p = Normal::new(*mean, *std).unwrap();
        let traj = accumulate_likelihood(&s, &p, s.len()).unwrap();
        for i in 1..=s.len() {
            let mut total : f64 = 1.;
            for x in s.as_slice()[0..i].iter() {
                total = total * (1. / (std * (2. * PI).sqrt())) *
                    (-0.5 * ((x - mean) / std).powi(2)).exp();
            }
            assert_eq!(traj.at(i).unwrap().to_bits(), total.to_bits());
        }
    }
}

#[test]
fn prefix_lengths() {
    let s = fixture();
    assert!(accumulate_likelihood(&s, &truth(), 0).unwrap().is_empty());
    assert_eq!(accumulate_likelihood(&s, &truth(), 25).unwrap().len(), 25);
    assert!(accumulate_likelihood(&s, &truth(), 51).is_err());
    let traj = accumulate_likelihood(&s, &truth(), 10).unwrap();
    assert_eq!(average_trajectories(&[traj], 0).unwrap().nrows(), 0);
}

#[test]
fn fixture_gap_is_positive() {
    let s = fixture();
    let a = accumulate_likelihood(&s, &truth(), 50).unwrap();
    let b = accumulate_likelihood(&s, &guess(), 50).unwrap();
    let avg = AverageTrajectory::paired(&[a], &[b], 50).unwrap();
    assert_eq!(avg.len(), 50);
    let kl = avg.kl_estimate().unwrap();
    assert!(kl > 0.);
    assert!((kl - 1.1935).abs() < 1E-3);
}

#[test]
fn averaged_gap_converges_to_closed_form() {
    let p = truth();
    let q = guess();
    let mut rng = StdRng::seed_from_u64(2024);
    let trials = TrialSet::draw(&p, 10, 100, &mut rng).unwrap();
    let avg = AverageTrajectory::from_trials(&trials, &p, &q, 100).unwrap();
    let kl = avg.kl_estimate().unwrap();
    assert!(kl >= 0.);
    assert!((kl - p.kl_divergence(&q)).abs() < 0.2);
    let last = avg.steps()[99];
    assert!((last.avg_log_true + p.entropy()).abs() < 0.2);
    assert!((last.avg_log_guess + p.cross_entropy(&q)).abs() < 0.3);
}

#[test]
fn product_and_log_averages_agree() {
    let config = ArticleConfig::default();
    let trials = config.trial_set().unwrap();
    let n = 40;
    let pairs = build_trajectories(trials.trials(), &truth(), &guess(), n).unwrap();
    let true_trajs : Vec<LikelihoodTrajectory> = pairs.iter().map(|p| p.a.clone() ).collect();
    let guess_trajs : Vec<LikelihoodTrajectory> = pairs.iter().map(|p| p.b.clone() ).collect();
    let from_products = AverageTrajectory::paired(&true_trajs[..], &guess_trajs[..], n).unwrap();
    let from_logs = AverageTrajectory::from_trials(&trials, &truth(), &guess(), n).unwrap();
    for (a, b) in from_products.steps().iter().zip(from_logs.steps().iter()) {
        assert_eq!(a.n, b.n);
        assert!((a.avg_log_true - b.avg_log_true).abs() < EPS);
        assert!((a.avg_log_guess - b.avg_log_guess).abs() < EPS);
    }
}

#[test]
fn long_horizons_underflow_only_on_product_scale() {
    let p = truth();
    let q = guess();
    let mut rng = StdRng::seed_from_u64(5);
    let trials = TrialSet::draw(&p, 3, 1500, &mut rng).unwrap();
    let traj = accumulate_likelihood(&trials.trials()[0], &q, 1500).unwrap();
    assert_eq!(traj.last().unwrap(), 0.0);
    assert_eq!(average_trajectories(&[traj], 1500).unwrap()[1499], f64::NEG_INFINITY);
    let avg = AverageTrajectory::from_trials(&trials, &p, &q, 1500).unwrap();
    assert!(avg.kl_estimate().unwrap().is_finite());
}

#[test]
fn trajectory_pairs_carry_palette() {
    let config = ArticleConfig::default();
    let trials = config.trial_set().unwrap();
    let pairs = build_trajectories(trials.trials(), &truth(), &guess(), 50).unwrap();
    assert_eq!(pairs.len(), config.trials.count);
    for (t, pair) in pairs.iter().enumerate() {
        assert_eq!(pair.trial, t);
        assert_eq!(pair.color_a, Palette::true_color(t));
        assert_eq!(pair.color_b, Palette::guess_color(t));
        assert_eq!(pair.a.len(), 50);
    }
}

#[test]
fn article_curves() {
    let config = ArticleConfig::default();
    let (lo, hi) = config.graph.x_range;
    let curve = generate_curve(&config.distributions.guess, lo, hi, config.graph.num_points).unwrap();
    assert_eq!(curve.len(), 101);
    let peak = curve.y.iter().cloned().fold(0.0, f64::max);
    assert!(peak < config.graph.y_range.1);
    let markers = sample_markers(config.samples.as_slice(), &config.distributions.truth);
    assert_eq!(markers.len(), 50);
    assert_eq!(markers[49].label, 50);
}

#[test]
fn slider_plays_from_maximum_to_maximum() {
    let config = ArticleConfig::default();
    let max_n = config.max_n();
    let mut slider = SliderController::at(max_n, max_n);
    let mut frames = Vec::new();
    let (ticks, clock) = {
        let mut playback = Playback::new(&mut slider, ManualClock::default(), config.tick_interval());
        let ticks = playback.run(|n| { frames.push(n); true });
        (ticks, playback.clock().clone())
    };
    assert_eq!(ticks, max_n + 1);
    assert_eq!(clock.waits, max_n + 1);
    assert_eq!(clock.elapsed, Duration::from_millis(50) * (max_n as u32 + 1));
    assert_eq!(&frames[0..max_n], &(1..=max_n).collect::<Vec<_>>()[..]);
    assert_eq!(slider.state(), PlayState::Idle);
    assert_eq!(slider.n(), max_n);
}
