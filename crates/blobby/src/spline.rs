//! Interpolating cubic spline over uniformly spaced knots.
//!
//! The spline passes through every input value and uses not-a-knot end
//! conditions: the third derivative is continuous across the second and
//! second-to-last knots, so the first two and last two pieces are each a
//! single cubic. With exactly four knots the whole spline is one cubic.
//!
//! Knots sit at `t = i / (n - 1)` on [0, 1]. With uniform spacing the
//! moment equations reduce to a tridiagonal system, solved below with the
//! Thomas algorithm.

use crate::error::SplineError;

/// Fewest knots a not-a-knot cubic can be fitted through.
pub const MIN_KNOTS: usize = 4;

/// A fitted cubic spline, stored as knot values plus second derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    values: Vec<f64>,
    /// Second derivative at each knot
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through `values`, placed at uniform knots on [0, 1].
    pub fn fit_uniform(values: &[f64]) -> Result<Self, SplineError> {
        let n = values.len();
        if n < MIN_KNOTS {
            return Err(SplineError::TooFewPoints(n));
        }

        let h = 1.0 / (n - 1) as f64;
        let scale = 6.0 / (h * h);

        // Unknowns are M[1..=n-2]; M[0] and M[n-1] follow from not-a-knot:
        //   M[0]   = 2 M[1]   - M[2]
        //   M[n-1] = 2 M[n-2] - M[n-3]
        // Substituting those into the first and last interior rows
        // leaves 6 on the diagonal and 0 on the outer off-diagonal.
        let m = n - 2;
        let mut sub = vec![1.0; m];
        let mut diag = vec![4.0; m];
        let mut sup = vec![1.0; m];
        let mut rhs: Vec<f64> = (1..=m)
            .map(|i| scale * (values[i + 1] - 2.0 * values[i] + values[i - 1]))
            .collect();

        diag[0] = 6.0;
        sup[0] = 0.0;
        diag[m - 1] = 6.0;
        sub[m - 1] = 0.0;

        solve_tridiagonal(&sub, &mut diag, &sup, &mut rhs);

        let mut moments = Vec::with_capacity(n);
        moments.push(2.0 * rhs[0] - rhs[1]);
        moments.extend_from_slice(&rhs);
        moments.push(2.0 * rhs[m - 1] - rhs[m - 2]);

        Ok(Self { values: values.to_vec(), moments })
    }

    /// Evaluate at parameter `t`.
    ///
    /// Values outside [0, 1] extrapolate the first or last piece.
    pub fn eval(&self, t: f64) -> f64 {
        let n = self.values.len();
        let segments = (n - 1) as f64;
        let h = 1.0 / segments;

        let i = if t <= 0.0 {
            0
        } else {
            ((t * segments).floor() as usize).min(n - 2)
        };

        let t0 = i as f64 / segments;
        let t1 = (i + 1) as f64 / segments;
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);

        let a = t1 - t;
        let b = t - t0;

        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Evaluate at `count` uniformly spaced parameters from 0 to 1 inclusive.
    pub fn sample(&self, count: usize) -> Vec<f64> {
        linspace(count).into_iter().map(|t| self.eval(t)).collect()
    }
}

/// `count` evenly spaced values from 0 to 1, both ends included.
pub fn linspace(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (count - 1) as f64;
            (0..count).map(|k| k as f64 / last).collect()
        }
    }
}

/// Thomas algorithm. Solution is written into `rhs`; `diag` is clobbered.
///
/// `sub[0]` and `sup[len - 1]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &mut [f64], sup: &[f64], rhs: &mut [f64]) {
    let len = diag.len();

    for i in 1..len {
        let w = sub[i] / diag[i - 1];
        diag[i] -= w * sup[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }

    rhs[len - 1] /= diag[len - 1];
    for i in (0..len - 1).rev() {
        rhs[i] = (rhs[i] - sup[i] * rhs[i + 1]) / diag[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn knots(n: usize) -> Vec<f64> {
        linspace(n)
    }

    #[test]
    fn rejects_three_points() {
        assert_eq!(
            CubicSpline::fit_uniform(&[0.0, 1.0, 0.0]),
            Err(SplineError::TooFewPoints(3))
        );
    }

    #[test]
    fn passes_through_knots() {
        let values = [0.3, -1.2, 0.8, 2.5, -0.4, 1.0, 0.3];
        let spline = CubicSpline::fit_uniform(&values).unwrap();

        for (t, y) in knots(values.len()).into_iter().zip(values) {
            assert_abs_diff_eq!(spline.eval(t), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn reproduces_cubic_polynomial() {
        let f = |t: f64| 2.0 * t * t * t - 3.0 * t * t + 0.5 * t - 1.0;
        let values: Vec<f64> = knots(9).into_iter().map(f).collect();
        let spline = CubicSpline::fit_uniform(&values).unwrap();

        for t in linspace(57) {
            assert_abs_diff_eq!(spline.eval(t), f(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn four_knots_is_a_single_cubic() {
        let f = |t: f64| t * t * t - t;
        let values: Vec<f64> = knots(4).into_iter().map(f).collect();
        let spline = CubicSpline::fit_uniform(&values).unwrap();

        for t in linspace(21) {
            assert_abs_diff_eq!(spline.eval(t), f(t), epsilon = 1e-10);
        }
    }

    #[test]
    fn linear_data_has_no_curvature() {
        let values: Vec<f64> = knots(6).into_iter().map(|t| 3.0 * t + 1.0).collect();
        let spline = CubicSpline::fit_uniform(&values).unwrap();

        for m in &spline.moments {
            assert_abs_diff_eq!(*m, 0.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(spline.eval(0.55), 2.65, epsilon = 1e-12);
    }

    #[test]
    fn sample_hits_both_ends() {
        let values = [1.0, 0.2, -0.7, 0.4, 1.0];
        let spline = CubicSpline::fit_uniform(&values).unwrap();
        let samples = spline.sample(300);

        assert_eq!(samples.len(), 300);
        assert_abs_diff_eq!(samples[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(samples[299], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0).is_empty());
        assert_eq!(linspace(1), vec![0.0]);
        assert_eq!(linspace(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn tridiagonal_solver() {
        // [2 1 0; 1 2 1; 0 1 2] x = [4 8 8] => x = [1 2 3]
        let sub = [0.0, 1.0, 1.0];
        let mut diag = [2.0, 2.0, 2.0];
        let sup = [1.0, 1.0, 0.0];
        let mut rhs = [4.0, 8.0, 8.0];
        solve_tridiagonal(&sub, &mut diag, &sup, &mut rhs);

        assert_abs_diff_eq!(rhs[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rhs[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rhs[2], 3.0, epsilon = 1e-12);
    }
}
