use argmin::core::{
    CostFunction,
    Error,
    Executor,
    State
};
use argmin::solver::brent::BrentRoot;

// ─────────────────────────────────────────────────────────────────────────────
// 係數運算（升冪排列：coefs[i] 對應 x^i）
// ─────────────────────────────────────────────────────────────────────────────

const BRENT_TOLERANCE: f64 = 1e-14;
const BRENT_MAX_ITERS: u64 = 200;
const ZERO_TOLERANCE: f64 = 1e-13;

/// Horner 求值；空係數視為零多項式。
pub fn horner(coefs: &[f64], x: f64) -> f64 {
    match coefs.split_last() {
        None => 0.0,
        Some((&leading, rest)) => rest
            .iter()
            .rev()
            .fold(leading, |acc, &beta| f64::mul_add(acc, x, beta)),
    }
}

/// 導數係數：i·c_i 往下移一格。常數（或空）多項式回傳 `[0.0]`。
pub fn derivative_coefs(coefs: &[f64]) -> Vec<f64> {
    if coefs.len() <= 1 {
        vec![0.0]
    } else {
        coefs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| i as f64 * c)
            .collect()
    }
}

/// 反導數係數：常數項為 `constant`，其餘為 c_i / (i+1) 往上移一格。
pub fn antiderivative_coefs(coefs: &[f64], constant: f64) -> Vec<f64> {
    std::iter::once(constant)
        .chain(
            coefs
                .iter()
                .enumerate()
                .map(|(i, &c)| c / (i + 1) as f64),
        )
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// 實根
// ─────────────────────────────────────────────────────────────────────────────
//
// 次數 ≤ 2 用封閉解；次數 ≥ 3 以導數的實根（遞迴求得）把實數線切成單調區段，
// 外側以 Cauchy bound 1 + max|c_i / c_n| 收尾，每個端點異號的區段交給 Brent。

/// 回傳升冪多項式的所有實根（遞增排序）。
///
/// 零多項式（每個 x 都是根）回傳 `None`。
pub fn real_roots(coefs: &[f64]) -> Option<Vec<f64>> {
    let degree = coefs.iter().rposition(|&c| c != 0.0)?;
    let coefs = &coefs[..=degree];
    let roots = match degree {
        0 => Vec::new(),
        1 => vec![-coefs[0] / coefs[1]],
        2 => quadratic_roots(coefs[0], coefs[1], coefs[2]),
        _ => bracketed_roots(coefs),
    };
    Some(roots)
}

/// a·x² + b·x + c = 0，使用避免相消誤差的形式：
///   q = -(b + sign(b)·√Δ) / 2,  x1 = q / a,  x2 = c / q
fn quadratic_roots(c: f64, b: f64, a: f64) -> Vec<f64> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        return vec![-b / (2.0 * a)];
    }

    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let (r1, r2) = (q / a, c / q);
    if r1 <= r2 {
        vec![r1, r2]
    } else {
        vec![r2, r1]
    }
}

fn bracketed_roots(coefs: &[f64]) -> Vec<f64> {
    let Some((&leading, lower)) = coefs.split_last() else {
        return Vec::new();
    };
    let bound = 1.0 + lower
        .iter()
        .map(|c| (c / leading).abs())
        .fold(0.0, f64::max);

    let critical = real_roots(&derivative_coefs(coefs)).unwrap_or_default();
    let mut knots = Vec::with_capacity(critical.len() + 2);
    knots.push(-bound);
    knots.extend(critical.into_iter().filter(|&x| -bound < x && x < bound));
    knots.push(bound);
    knots.sort_by(f64::total_cmp);
    knots.dedup();

    let values: Vec<f64> = knots.iter().map(|&x| snapped_value(coefs, x)).collect();
    let mut roots: Vec<f64> = Vec::new();
    for i in 0..(knots.len() - 1) {
        if values[i] == 0.0 {
            if roots.last() != Some(&knots[i]) {
                roots.push(knots[i]);
            }
        } else if values[i] * values[i + 1] < 0.0 {
            if let Some(root) = brent_root(coefs, knots[i], knots[i + 1]) {
                roots.push(root);
            }
        }
    }
    roots
}

/// 端點值若落在捨入誤差範圍內則視為 0，偶數重根（切點）才找得到。
fn snapped_value(coefs: &[f64], x: f64) -> f64 {
    let value = horner(coefs, x);
    let magnitude = x.abs().max(1.0);
    let scale = coefs
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * magnitude + c.abs());
    if value.abs() <= ZERO_TOLERANCE * scale {
        0.0
    } else {
        value
    }
}

struct PolynomialResidual {
    coefs: Vec<f64>
}

impl CostFunction for PolynomialResidual {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        Ok(horner(&self.coefs, *x))
    }
}

fn brent_root(coefs: &[f64], lo: f64, hi: f64) -> Option<f64> {
    let problem = PolynomialResidual { coefs: coefs.to_vec() };
    let solver = BrentRoot::new(lo, hi, BRENT_TOLERANCE);
    match Executor::new(problem, solver)
        .configure(|state| state.max_iters(BRENT_MAX_ITERS))
        .run()
    {
        Ok(result) => result.state().get_param().copied(),
        Err(error) => {
            log::debug!("root bracket [{}, {}] skipped: {}", lo, hi, error);
            None
        }
    }
}
