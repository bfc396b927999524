//! Gaussian latitudes for spectral model grids.
//!
//! The latitudes of a Gaussian grid with `n` rows are `asin(x_k)` where `x_k`
//! are the roots of the Legendre polynomial P_n. The matching quadrature
//! weights are `w_k = 2 / ((1 - x_k²) P'_n(x_k)²)` and sum to 2, which is also
//! the area of the unit sphere per radian of longitude.

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-15;

/// Evaluate P_n(x) and P'_n(x) with the three-term recurrence.
fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p_curr = x;

    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }

    // Roots of P_n never sit at x = ±1, so the closed form is safe here.
    let dp = n as f64 * (x * p_curr - p_prev) / (x * x - 1.0);

    (p_curr, dp)
}

/// Returns the Gaussian latitudes in degrees, ordered north to south, and
/// their quadrature weights.
pub fn gaussian_latitudes(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut latitudes = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);

    for k in 0..n {
        // Initial guess, then Newton iteration on P_n.
        let mut x = (std::f64::consts::PI * (k as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..MAX_ITERATIONS {
            let (p, dp) = legendre_and_derivative(n, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < TOLERANCE {
                break;
            }
        }
        let (_, dp) = legendre_and_derivative(n, x);

        latitudes.push(x.asin().to_degrees());
        weights.push(2.0 / ((1.0 - x * x) * dp * dp));
    }

    (latitudes, weights)
}
