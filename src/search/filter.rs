//! Candidate filter: which records clear a threshold pair plus the score floors.

use crate::domain::Candidate;

/// Return the candidates passing all four cutoffs, in input order.
///
/// The floors (`min_class_score`, `min_quiz_score`) are independent of the
/// swept thresholds; both must hold.
pub fn filter_passing_candidates(
    dataset: &[Candidate],
    class_threshold: u32,
    quiz_threshold: u32,
    min_class_score: u32,
    min_quiz_score: u32,
) -> Vec<&Candidate> {
    dataset
        .iter()
        .filter(|c| c.passes(class_threshold, quiz_threshold, min_class_score, min_quiz_score))
        .collect()
}

/// Number of high-school candidates in a filtered subset.
pub fn count_highschool(subset: &[&Candidate]) -> usize {
    subset.iter().filter(|c| c.is_highschool).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::{SampleConfig, generate_candidates};
    use crate::domain::{CLASS_THRESHOLDS, QUIZ_THRESHOLDS};

    fn sample() -> Vec<Candidate> {
        generate_candidates(&SampleConfig {
            count: 300,
            seed: 11,
            ..SampleConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn retained_records_satisfy_every_cutoff_and_excluded_violate_one() {
        let data = sample();
        for (fc, fq) in [(0, 0), (5, 5), (9, 2)] {
            for c in CLASS_THRESHOLDS {
                for q in QUIZ_THRESHOLDS {
                    let kept = filter_passing_candidates(&data, c, q, fc, fq);
                    for r in &kept {
                        assert!(r.class_score >= c && r.quiz_score >= q);
                        assert!(r.class_score >= fc && r.quiz_score >= fq);
                    }
                    let excluded: Vec<&Candidate> = data.iter().filter(|r| !r.passes(c, q, fc, fq)).collect();
                    for r in &excluded {
                        assert!(r.class_score < c || r.quiz_score < q || r.class_score < fc || r.quiz_score < fq);
                    }
                    assert_eq!(kept.len() + excluded.len(), data.len());
                }
            }
        }
    }

    #[test]
    fn preserves_input_order() {
        let data = vec![
            Candidate::new(9, 9, "Design", false),
            Candidate::new(1, 1, "Design", false),
            Candidate::new(7, 8, "Business", true),
            Candidate::new(10, 2, "Technology", false),
            Candidate::new(8, 7, "Technology", true),
        ];
        let kept = filter_passing_candidates(&data, 5, 5, 0, 0);
        assert_eq!(kept, vec![&data[0], &data[2], &data[4]]);
        assert_eq!(count_highschool(&kept), 2);
    }

    #[test]
    fn floors_apply_even_when_thresholds_are_lower() {
        let data = vec![
            Candidate::new(4, 11, "Design", false),
            Candidate::new(5, 5, "Design", false),
        ];
        let kept = filter_passing_candidates(&data, 1, 1, 5, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].class_score, 5);
    }

    #[test]
    fn raising_a_threshold_never_grows_the_result() {
        let data = sample();
        for c in CLASS_THRESHOLDS {
            for q in QUIZ_THRESHOLDS {
                let here = filter_passing_candidates(&data, c, q, 0, 0).len();
                let up_class = filter_passing_candidates(&data, c + 1, q, 0, 0).len();
                let up_quiz = filter_passing_candidates(&data, c, q + 1, 0, 0).len();
                assert!(up_class <= here);
                assert!(up_quiz <= here);
            }
        }
    }
}
