//! Synthetic candidate pool generation.
//!
//! Scores are drawn from normal distributions, rounded and clamped into their
//! bounds, so the pool looks like a real cohort (most candidates mid-range,
//! few at the extremes). Everything is driven by a seeded `StdRng`.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{CLASS_SCORE_MAX, Candidate, DEFAULT_SPECIALTIES, QUIZ_SCORE_MAX};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    pub class_mean: f64,
    pub class_sd: f64,
    pub quiz_mean: f64,
    pub quiz_sd: f64,
    /// Probability that a candidate is flagged as high school.
    pub highschool_prob: f64,
    /// Labels drawn uniformly.
    pub specialties: Vec<String>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: 200,
            seed: 42,
            class_mean: 8.0,
            class_sd: 3.0,
            quiz_mean: 6.0,
            quiz_sd: 2.5,
            highschool_prob: 0.2,
            specialties: DEFAULT_SPECIALTIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn generate_candidates(config: &SampleConfig) -> Result<Vec<Candidate>, AppError> {
    if config.count == 0 {
        return Err(AppError::input("Sample count must be > 0."));
    }
    if config.specialties.is_empty() || config.specialties.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::input("Sample specialties must be non-empty labels."));
    }
    if !(0.0..=1.0).contains(&config.highschool_prob) {
        return Err(AppError::input("High-school probability must be within 0.0..=1.0."));
    }
    for (name, sd) in [("class", config.class_sd), ("quiz", config.quiz_sd)] {
        if !(sd.is_finite() && sd >= 0.0) {
            return Err(AppError::input(format!(
                "Sample {name} score spread must be a finite value >= 0 (got {sd})."
            )));
        }
    }

    let class_dist = Normal::new(config.class_mean, config.class_sd)
        .map_err(|e| AppError::input(format!("Invalid class score distribution: {e}")))?;
    let quiz_dist = Normal::new(config.quiz_mean, config.quiz_sd)
        .map_err(|e| AppError::input(format!("Invalid quiz score distribution: {e}")))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut out = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let class_score = clamp_score(class_dist.sample(&mut rng), CLASS_SCORE_MAX);
        let quiz_score = clamp_score(quiz_dist.sample(&mut rng), QUIZ_SCORE_MAX);
        let specialty = config.specialties[rng.gen_range(0..config.specialties.len())].clone();
        let is_highschool = rng.gen_bool(config.highschool_prob);

        out.push(Candidate {
            class_score,
            quiz_score,
            specialty,
            is_highschool,
        });
    }

    Ok(out)
}

fn clamp_score(raw: f64, max: u32) -> u32 {
    raw.round().clamp(0.0, max as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_pool() {
        let config = SampleConfig {
            count: 64,
            seed: 7,
            ..SampleConfig::default()
        };
        assert_eq!(generate_candidates(&config).unwrap(), generate_candidates(&config).unwrap());

        let other = SampleConfig { seed: 8, ..config.clone() };
        assert_ne!(generate_candidates(&other).unwrap(), generate_candidates(&config).unwrap());
    }

    #[test]
    fn scores_stay_in_bounds() {
        let config = SampleConfig {
            count: 2000,
            class_sd: 10.0,
            quiz_sd: 10.0,
            ..SampleConfig::default()
        };
        for c in generate_candidates(&config).unwrap() {
            assert!(c.class_score <= CLASS_SCORE_MAX);
            assert!(c.quiz_score <= QUIZ_SCORE_MAX);
            assert!(DEFAULT_SPECIALTIES.contains(&c.specialty.as_str()));
        }
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(generate_candidates(&SampleConfig { count: 0, ..SampleConfig::default() }).is_err());
        assert!(
            generate_candidates(&SampleConfig {
                highschool_prob: 1.5,
                ..SampleConfig::default()
            })
            .is_err()
        );
        assert!(
            generate_candidates(&SampleConfig {
                specialties: vec![],
                ..SampleConfig::default()
            })
            .is_err()
        );
        assert!(
            generate_candidates(&SampleConfig {
                class_sd: -1.0,
                ..SampleConfig::default()
            })
            .is_err()
        );
        let err = generate_candidates(&SampleConfig {
            quiz_sd: f64::NAN,
            ..SampleConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("quiz"));
    }

    #[test]
    fn zero_spread_pins_scores_to_the_mean() {
        let pool = generate_candidates(&SampleConfig {
            count: 20,
            class_sd: 0.0,
            quiz_sd: 0.0,
            ..SampleConfig::default()
        })
        .unwrap();
        assert!(pool.iter().all(|c| c.class_score == 8 && c.quiz_score == 6));
    }

    #[test]
    fn highschool_probability_extremes() {
        let all = generate_candidates(&SampleConfig {
            highschool_prob: 1.0,
            ..SampleConfig::default()
        })
        .unwrap();
        assert!(all.iter().all(|c| c.is_highschool));
        let none = generate_candidates(&SampleConfig {
            highschool_prob: 0.0,
            ..SampleConfig::default()
        })
        .unwrap();
        assert!(none.iter().all(|c| !c.is_highschool));
    }
}
