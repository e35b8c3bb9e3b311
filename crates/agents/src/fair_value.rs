//! Fair-value estimation.
//!
//! Two models: a private exponentially-smoothed estimate that each
//! trader updates from observed prices, and the plain bid-ask midpoint.

use crate::context::MarketView;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Exponential smoothing update:
/// `new = previous + alpha * (observed - previous)`.
#[inline]
pub fn smoothed(previous: f64, observed: f64, alpha: f64) -> f64 {
    previous + alpha * (observed - previous)
}

/// Midpoint of the bid-ask spread.
#[inline]
pub fn mid(best_bid: f64, best_ask: f64) -> f64 {
    (best_bid + best_ask) / 2.0
}

/// A trader's fair-value model, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum FairValueModel {
    /// Private estimate updated by exponential smoothing of observed
    /// prices.
    Private { alpha: f64, estimate: f64 },
    /// Bid-ask midpoint, falling back to the current price on a
    /// one-sided book.
    Mid,
}

impl FairValueModel {
    /// Sample a model at trader construction: with probability
    /// `private_odds` a private smoothing model with alpha drawn from
    /// `alpha_range` and a Gaussian-jittered initial estimate around
    /// `anchor`, otherwise the midpoint model.
    pub fn sample(
        rng: &mut StdRng,
        private_odds: f64,
        alpha_range: (f64, f64),
        anchor: f64,
        jitter_sigma: f64,
    ) -> Self {
        if rng.random_bool(private_odds) {
            let alpha = rng.random_range(alpha_range.0..alpha_range.1);
            let jitter: f64 = rng.sample(StandardNormal);
            FairValueModel::Private {
                alpha,
                estimate: anchor + jitter * jitter_sigma,
            }
        } else {
            FairValueModel::Mid
        }
    }

    /// Current fair value for this view, updating the private estimate
    /// as a side effect.
    pub fn current(&mut self, view: &MarketView) -> f64 {
        let observed = view.mid_or_last();
        match self {
            FairValueModel::Private { alpha, estimate } => {
                *estimate = smoothed(*estimate, observed, *alpha);
                *estimate
            }
            FairValueModel::Mid => observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use types::Price;

    #[test]
    fn smoothing_moves_toward_observation() {
        assert_eq!(smoothed(100.0, 110.0, 0.2), 102.0);
        assert_eq!(smoothed(100.0, 110.0, 0.5), 105.0);
        assert_eq!(smoothed(100.0, 110.0, 0.0), 100.0);
        assert_eq!(smoothed(100.0, 110.0, 1.0), 110.0);
    }

    #[test]
    fn mid_is_average() {
        assert_eq!(mid(99.0, 101.0), 100.0);
    }

    #[test]
    fn private_model_converges_on_constant_observation() {
        let view = MarketView::new(Price::from_float(100.0), None, None);
        let mut model = FairValueModel::Private {
            alpha: 0.3,
            estimate: 90.0,
        };
        let mut last = 90.0;
        for _ in 0..50 {
            let fv = model.current(&view);
            assert!(fv > last);
            last = fv;
        }
        assert!((last - 100.0).abs() < 0.01);
    }

    #[test]
    fn mid_model_tracks_quote() {
        let mut model = FairValueModel::Mid;
        let view = MarketView::new(
            Price::from_float(100.0),
            Some(Price::from_float(98.0)),
            Some(Price::from_float(100.0)),
        );
        assert_eq!(model.current(&view), 99.0);
    }

    #[test]
    fn sampled_alpha_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let model = FairValueModel::sample(&mut rng, 1.0, (0.1, 0.5), 100.0, 2.0);
            match model {
                FairValueModel::Private { alpha, .. } => {
                    assert!((0.1..0.5).contains(&alpha));
                }
                FairValueModel::Mid => panic!("private_odds of 1.0 must sample private"),
            }
        }
    }
}
