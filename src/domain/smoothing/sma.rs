//! Simple moving average.
//!
//! SMA(n)[i] = mean(P[i-k+1..=i]) where k = min(n, i+1)

use crate::domain::observation::Observation;
use crate::domain::smoothing::SmoothedPoint;

pub fn calculate_sma(data: &[Observation], window: usize) -> Vec<SmoothedPoint> {
    if window == 0 || data.is_empty() {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(data.len());
    let mut window_sum = 0.0_f64;

    for (i, obs) in data.iter().enumerate() {
        window_sum += obs.price;
        if i >= window {
            window_sum -= data[i - window].price;
        }
        let count = (i + 1).min(window) as f64;
        points.push(SmoothedPoint::from_observation(obs, window_sum / count));
    }

    points
}
