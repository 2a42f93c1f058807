//! Single-diode equation solver.
//!
//! Uses the Bishop (1988) formulation: current and voltage are explicit
//! functions of the diode voltage, so every point of interest reduces to a
//! one-dimensional root find along the diode-voltage axis. Newton's method
//! with analytic derivatives does the work; the maximum-power search falls
//! back to a golden-section scan when Newton wanders.

use super::params::DiodeParams;

const NEWTON_TOL: f64 = 1e-8;
const NEWTON_MAX_ITER: usize = 100;
const GOLDEN_ATOL: f64 = 1e-8;

/// One point of the IV curve with the derivatives Newton needs.
#[derive(Debug, Clone, Copy)]
struct Bishop88Point {
    current: f64,
    voltage: f64,
    /// dI/dVd
    grad_i: f64,
    /// dV/dVd
    grad_v: f64,
    /// dP/dVd
    grad_p: f64,
    /// d²P/dVd²
    grad2p: f64,
}

/// Evaluates the diode equation at a diode voltage.
fn bishop88(diode_voltage: f64, p: &DiodeParams) -> Bishop88Point {
    let a = (diode_voltage / p.nnsvth).exp();
    let b = 1.0 / p.shunt_resistance;
    let current =
        p.photocurrent - p.saturation_current * (a - 1.0) - diode_voltage * b;
    let voltage = diode_voltage - current * p.series_resistance;
    let c = p.saturation_current * a / p.nnsvth;
    let grad_i = -c - b;
    let grad_v = 1.0 - grad_i * p.series_resistance;
    let grad = grad_i / grad_v;
    let grad_p = voltage * grad + current;
    let grad2i = -c / p.nnsvth;
    let grad2v = -grad2i * p.series_resistance;
    let grad2p = grad_v * grad
        + voltage * (grad2i / grad_v - grad_i * grad2v / (grad_v * grad_v))
        + grad_i;
    Bishop88Point {
        current,
        voltage,
        grad_i,
        grad_v,
        grad_p,
        grad2p,
    }
}

/// Rough open-circuit voltage estimate, the Newton starting point.
fn est_voc(p: &DiodeParams) -> f64 {
    p.nnsvth * (p.photocurrent / p.saturation_current + 1.0).ln()
}

/// Newton iteration on `f`, which returns the residual and its derivative.
fn newton(f: impl Fn(f64) -> (f64, f64), x0: f64) -> Option<f64> {
    let mut x = x0;
    for _ in 0..NEWTON_MAX_ITER {
        let (fx, dfx) = f(x);
        if !fx.is_finite() || !dfx.is_finite() || dfx == 0.0 {
            return None;
        }
        let step = fx / dfx;
        x -= step;
        if step.abs() < NEWTON_TOL {
            return Some(x);
        }
    }
    None
}

/// Golden-section maximization of `f` on `[lo, hi]`.
fn golden_section_max(f: impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> f64 {
    let phim1 = (5.0_f64.sqrt() - 1.0) / 2.0;
    let iterations = ((GOLDEN_ATOL / (hi - lo)).ln() / phim1.ln()).trunc() as usize + 1;
    for _ in 0..iterations {
        let d = phim1 * (hi - lo);
        let x1 = hi - d;
        let x2 = lo + d;
        if f(x1) < f(x2) {
            lo = x1;
        } else {
            hi = x2;
        }
    }
    0.5 * (lo + hi)
}

/// DC operating summary of a module (or array) at one condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleDiodeResult {
    /// Short-circuit current, A.
    pub i_sc: f64,
    /// Open-circuit voltage, V.
    pub v_oc: f64,
    /// Current at the maximum power point, A.
    pub i_mp: f64,
    /// Voltage at the maximum power point, V.
    pub v_mp: f64,
    /// Maximum power, W.
    pub p_mp: f64,
    /// Current at half the open-circuit voltage, A.
    pub i_x: f64,
    /// Current midway between `v_mp` and `v_oc`, A.
    pub i_xx: f64,
}

impl SingleDiodeResult {
    /// All-zero result for a dark module.
    pub fn dark() -> Self {
        Self {
            i_sc: 0.0,
            v_oc: 0.0,
            i_mp: 0.0,
            v_mp: 0.0,
            p_mp: 0.0,
            i_x: 0.0,
            i_xx: 0.0,
        }
    }
}

/// Solves the single-diode equation for the standard IV summary points.
pub fn singlediode(p: &DiodeParams) -> SingleDiodeResult {
    if p.photocurrent <= 0.0 {
        return SingleDiodeResult::dark();
    }
    let voc_est = est_voc(p);

    // Open circuit: current is zero, so the terminal voltage equals the
    // diode voltage.
    let v_oc = newton(
        |vd| {
            let pt = bishop88(vd, p);
            (pt.current, pt.grad_i)
        },
        voc_est,
    )
    .unwrap_or(voc_est);

    let i_sc = newton(
        |vd| {
            let pt = bishop88(vd, p);
            (pt.voltage, pt.grad_v)
        },
        0.0,
    )
    .map(|vd| bishop88(vd, p).current)
    .unwrap_or(p.photocurrent);

    let vd_mp = newton(
        |vd| {
            let pt = bishop88(vd, p);
            (pt.grad_p, pt.grad2p)
        },
        voc_est,
    )
    .filter(|vd| vd.is_finite() && (0.0..=voc_est).contains(vd))
    .unwrap_or_else(|| {
        golden_section_max(
            |vd| {
                let pt = bishop88(vd, p);
                pt.current * pt.voltage
            },
            0.0,
            voc_est,
        )
    });
    let mp = bishop88(vd_mp, p);
    let (i_mp, v_mp) = (mp.current, mp.voltage);

    let i_x = current_at_voltage(p, v_oc / 2.0).unwrap_or(0.0);
    let i_xx = current_at_voltage(p, (v_oc + v_mp) / 2.0).unwrap_or(0.0);

    SingleDiodeResult {
        i_sc,
        v_oc,
        i_mp,
        v_mp,
        p_mp: i_mp * v_mp,
        i_x,
        i_xx,
    }
}

/// Current at a given terminal voltage.
pub fn current_at_voltage(p: &DiodeParams, voltage: f64) -> Option<f64> {
    newton(
        |vd| {
            let pt = bishop88(vd, p);
            (pt.voltage - voltage, pt.grad_v)
        },
        voltage,
    )
    .map(|vd| bishop88(vd, p).current)
}

/// Samples the IV curve from short circuit to open circuit.
///
/// Points are spaced logarithmically in diode voltage so the knee of the
/// curve is well resolved.
pub fn iv_curve(p: &DiodeParams, points: usize) -> Vec<(f64, f64)> {
    if p.photocurrent <= 0.0 || points < 2 {
        return Vec::new();
    }
    let voc_est = est_voc(p);
    let vd_oc = newton(
        |vd| {
            let pt = bishop88(vd, p);
            (pt.current, pt.grad_i)
        },
        voc_est,
    )
    .unwrap_or(voc_est);
    // Diode voltage at the short-circuit point (terminal voltage zero).
    let vd_sc = newton(
        |vd| {
            let pt = bishop88(vd, p);
            (pt.voltage, pt.grad_v)
        },
        0.0,
    )
    .unwrap_or(0.0);

    let log_start = 11.0_f64.log10();
    (0..points)
        .map(|k| {
            let frac = k as f64 / (points - 1) as f64;
            let spaced = 10.0_f64.powf(log_start * (1.0 - frac));
            let vd = vd_sc + (vd_oc - vd_sc) * (11.0 - spaced) / 10.0;
            let pt = bishop88(vd, p);
            (pt.voltage, pt.current)
        })
        .collect()
}
