//! Ordinary least-squares fit of price against observation index.
//!
//! x is the position in the series (0..n-1), not the calendar date, so
//! irregular spacing between observations is ignored.
//!
//! slope     = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! r2        = 1 − SS_res / SS_tot

use crate::domain::observation::Observation;

/// Residual spread below this is floating-point noise from a perfect fit.
/// It is treated as zero, so callers apply their fallback spread instead of
/// projecting near-zero bands. Only exactly-zero spread would otherwise fall
/// back.
const RESIDUAL_NOISE_FLOOR: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
}

impl RegressionFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

pub fn linear_regression(data: &[Observation]) -> RegressionFit {
    let n = data.len();
    if n < 2 {
        return RegressionFit {
            slope: 0.0,
            intercept: data.first().map(|o| o.price).unwrap_or(0.0),
            r2: 0.0,
        };
    }

    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;
    let mut sum_xy = 0.0_f64;
    let mut sum_x2 = 0.0_f64;
    let mut sum_y2 = 0.0_f64;

    for (i, obs) in data.iter().enumerate() {
        let x = i as f64;
        let y = obs.price;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let nf = n as f64;
    let denominator = nf * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return RegressionFit {
            slope: 0.0,
            intercept: sum_y / nf,
            r2: 0.0,
        };
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / nf;

    let y_mean = sum_y / nf;
    let mut ss_tot = 0.0_f64;
    let mut ss_res = 0.0_f64;
    for (i, obs) in data.iter().enumerate() {
        let predicted = slope * i as f64 + intercept;
        ss_tot += (obs.price - y_mean).powi(2);
        ss_res += (obs.price - predicted).powi(2);
    }

    // A flat series leaves rounding noise in SS_tot; it explains nothing.
    let r2 = if ss_tot > f64::EPSILON * sum_y2 {
        1.0 - ss_res / ss_tot
    } else {
        0.0
    };

    RegressionFit {
        slope,
        intercept,
        r2,
    }
}

/// Residual standard deviation with n−2 degrees of freedom.
/// `None` when it is undefined (n ≤ 2), zero, or not a usable number.
pub fn residual_std_dev(data: &[Observation], fit: &RegressionFit) -> Option<f64> {
    let n = data.len();
    if n <= 2 {
        return None;
    }
    let ss_res: f64 = data
        .iter()
        .enumerate()
        .map(|(i, obs)| (obs.price - fit.predict(i as f64)).powi(2))
        .sum();
    let std_dev = (ss_res / (n - 2) as f64).sqrt();
    if std_dev.is_finite() && std_dev > RESIDUAL_NOISE_FLOOR {
        Some(std_dev)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(prices: &[f64]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Observation::new(start + chrono::Duration::days(i as i64), price))
            .collect()
    }

    #[test]
    fn empty_series() {
        let fit = linear_regression(&[]);
        assert_eq!(
            fit,
            RegressionFit {
                slope: 0.0,
                intercept: 0.0,
                r2: 0.0
            }
        );
    }

    #[test]
    fn single_point_uses_its_price() {
        let fit = linear_regression(&make_series(&[5.4]));
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 5.4);
        assert_eq!(fit.r2, 0.0);
    }

    #[test]
    fn perfect_line() {
        let fit = linear_regression(&make_series(&[5.0, 5.1, 5.2]));
        assert_relative_eq!(fit.slope, 0.1, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 5.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r2, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn falling_line() {
        let fit = linear_regression(&make_series(&[10.0, 8.0, 6.0, 4.0]));
        assert_relative_eq!(fit.slope, -2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_has_zero_r2() {
        let fit = linear_regression(&make_series(&[5.1; 12]));
        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 5.1, epsilon = 1e-12);
        assert_eq!(fit.r2, 0.0);
    }

    #[test]
    fn noisy_series_known_values() {
        // x = 0..4, y = 1, 3, 2, 5, 4 → slope 0.8, intercept 1.4, r2 0.64
        let fit = linear_regression(&make_series(&[1.0, 3.0, 2.0, 5.0, 4.0]));
        assert_relative_eq!(fit.slope, 0.8, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.4, epsilon = 1e-12);
        assert_relative_eq!(fit.r2, 0.64, epsilon = 1e-12);
    }

    #[test]
    fn residual_std_dev_two_points_is_undefined() {
        let data = make_series(&[5.0, 6.0]);
        let fit = linear_regression(&data);
        assert_eq!(residual_std_dev(&data, &fit), None);
    }

    #[test]
    fn residual_std_dev_perfect_fit_is_undefined() {
        let data = make_series(&[5.0, 5.5, 6.0, 6.5]);
        let fit = linear_regression(&data);
        assert_eq!(residual_std_dev(&data, &fit), None);
    }

    #[test]
    fn residual_std_dev_known_value() {
        // residuals: -0.4, 0.8, -1.0, 1.2, -0.6 → SS_res 3.6, /3 → sqrt(1.2)
        let data = make_series(&[1.0, 3.0, 2.0, 5.0, 4.0]);
        let fit = linear_regression(&data);
        let sd = residual_std_dev(&data, &fit).unwrap();
        assert_relative_eq!(sd, 1.2_f64.sqrt(), epsilon = 1e-12);
    }
}
