use serde::Deserialize;

use crate::math::function::piecewisefunction::{
    Band,
    PiecewiseFunction
};
use crate::math::function::polynomial::Polynomial;
use crate::math::point2d::Point2D;

// ─────────────────────────────────────────────
// ControlPoint / InterpolationOptions
// ─────────────────────────────────────────────

/// 插值控制點；`dfx` 為指定斜率，`None` 表示交由演算法推導。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ControlPoint {
    x: f64,
    fx: f64,
    #[serde(default)]
    dfx: Option<f64>,
}

impl ControlPoint {
    pub fn new(x: f64, fx: f64) -> ControlPoint {
        ControlPoint { x, fx, dfx: None }
    }

    pub fn with_dfx(x: f64, fx: f64, dfx: f64) -> ControlPoint {
        ControlPoint { x, fx, dfx: Some(dfx) }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn fx(&self) -> f64 {
        self.fx
    }

    pub fn dfx(&self) -> Option<f64> {
        self.dfx
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.fx)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterpolationOptions {
    /// 局部極值點斜率強制為 0
    preserve_extrema: bool,
    /// 內部節點斜率改用角度平均 tan((atan(l) + atan(r)) / 2)，急轉處 overshoot 較小
    atan_mean_dfx: bool,
}

impl InterpolationOptions {
    pub fn new(preserve_extrema: bool, atan_mean_dfx: bool) -> InterpolationOptions {
        InterpolationOptions { preserve_extrema, atan_mean_dfx }
    }

    pub fn preserve_extrema(&self) -> bool {
        self.preserve_extrema
    }

    pub fn atan_mean_dfx(&self) -> bool {
        self.atan_mean_dfx
    }
}

// ─────────────────────────────────────────────
// 區間資料
// ─────────────────────────────────────────────

struct Interval {
    begin: ControlPoint,
    end: ControlPoint,
    mid_x: f64,
    dfx: f64,
}

fn generate_interval_list(points: &[ControlPoint]) -> Vec<Interval> {
    points
        .windows(2)
        .map(|pair| Interval {
            begin: pair[0],
            end: pair[1],
            mid_x: (pair[0].x + pair[1].x) / 2.0,
            dfx: Point2D::slope(&pair[0].point(), &pair[1].point()),
        })
        .collect()
}

fn is_local_extremum(prev: f64, current: f64, next: f64) -> bool {
    (current > prev && current > next) || (current < prev && current < next)
}

/// 各控制點的斜率。
///
/// 內部節點（未指定時）：
///   - preserve_extrema 且為局部極值 → 0
///   - atan_mean_dfx → tan((atan(l) + atan(r)) / 2)
///   - 否則 → (l + r) / 2
/// 端點未指定時保持 `None`，留給區間階段處理。
fn generate_knot_dfx_list(
    points: &[ControlPoint],
    intervals: &[Interval],
    options: InterpolationOptions,
) -> Vec<Option<f64>> {
    let n = points.len();
    (0..n)
        .map(|i| {
            if points[i].dfx.is_some() || i == 0 || i == n - 1 {
                return points[i].dfx;
            }
            let left = intervals[i - 1].dfx;
            let right = intervals[i].dfx;
            let dfx = if options.preserve_extrema
                && is_local_extremum(points[i - 1].fx, points[i].fx, points[i + 1].fx)
            {
                0.0
            } else if options.atan_mean_dfx {
                ((left.atan() + right.atan()) / 2.0).tan()
            } else {
                (left + right) / 2.0
            };
            Some(dfx)
        })
        .collect()
}

/// 決定區間起點、中點、終點的斜率 (begin, mid, end)。
///
/// 導數在兩個半區間上各為線性，區間平均斜率必須等於割線斜率 I：
///   (begin + 2·mid + end) / 4 = I
/// - 兩端皆已知：mid = (4I - begin - end) / 2
/// - 只缺一端：假設 mid = I，缺的一端 = 4I - known - 2·mid
/// - 兩端皆未知：三者皆為 I（線段）
fn resolve_interval_dfx(begin: Option<f64>, end: Option<f64>, interval_dfx: f64) -> (f64, f64, f64) {
    match (begin, end) {
        (Some(b), Some(e)) => (b, (4.0 * interval_dfx - b - e) / 2.0, e),
        (Some(b), None) => {
            let mid = interval_dfx;
            (b, mid, 4.0 * interval_dfx - b - 2.0 * mid)
        },
        (None, Some(e)) => {
            let mid = interval_dfx;
            (4.0 * interval_dfx - e - 2.0 * mid, mid, e)
        },
        (None, None) => (interval_dfx, interval_dfx, interval_dfx),
    }
}

/// 半區間的二次式，以 anchor 控制點為展開點：
///   p(t) = anchor_fx + anchor_dfx·t + a·t²,  t = x - anchor_x
///   a = (mid_dfx - anchor_dfx) / (2·(mid_x - anchor_x))
/// 使 p'(anchor_x) = anchor_dfx、p'(mid_x) = mid_dfx。
fn generate_half_interval_coefs(anchor: (f64, f64, f64), mid: (f64, f64)) -> Vec<f64> {
    let (anchor_x, anchor_fx, anchor_dfx) = anchor;
    let (mid_x, mid_dfx) = mid;
    let a = (mid_dfx - anchor_dfx) / (2.0 * (mid_x - anchor_x));
    vec![anchor_fx, anchor_dfx, a]
}

// ─────────────────────────────────────────────
// interpolate
// ─────────────────────────────────────────────
//
// 每個區間在中點切成兩段二次式（共 2·(n-1) 個 band）：
//   左半 [x_i, mid_x]     以 (x_i, fx_i) 為 anchor
//   右半 [mid_x, x_{i+1}] 以 (x_{i+1}, fx_{i+1}) 為 anchor
//
// 性質：
//   - 控制點上逐位元插值
//   - 控制點與中點處值與一階導數連續（C1）
//   - 中點處二階導數一般不連續；這是與完整 cubic spline 的取捨，不是缺陷
//
// 不驗證輸入：少於兩點得到空容器（任何 x 求值皆為 NaN），
// x 重複則區間寬度為 0，inf / NaN 會一路傳遞到係數。

/// 由控制點建立 C1 分段二次插值函數。
pub fn interpolate(mut points: Vec<ControlPoint>, options: InterpolationOptions) -> PiecewiseFunction {
    points.sort_by(|lhs, rhs| lhs.x.total_cmp(&rhs.x));

    if points.len() < 2 {
        log::warn!("interpolation needs at least 2 control points, got {}", points.len());
    } else if points.windows(2).any(|pair| pair[0].x >= pair[1].x) {
        log::warn!("interpolation control points contain duplicate x values");
    }

    let intervals = generate_interval_list(&points);
    let knot_dfx_list = generate_knot_dfx_list(&points, &intervals, options);

    let mut bands = Vec::with_capacity(2 * intervals.len());
    for (i, interval) in intervals.iter().enumerate() {
        let (begin_dfx, mid_dfx, end_dfx) =
            resolve_interval_dfx(knot_dfx_list[i], knot_dfx_list[i + 1], interval.dfx);

        let left = generate_half_interval_coefs(
            (interval.begin.x, interval.begin.fx, begin_dfx),
            (interval.mid_x, mid_dfx),
        );
        bands.push(Band::new(
            interval.begin.x,
            interval.mid_x,
            Box::new(Polynomial::with_origin(left, interval.begin.x)),
        ));

        let right = generate_half_interval_coefs(
            (interval.end.x, interval.end.fx, end_dfx),
            (interval.mid_x, mid_dfx),
        );
        bands.push(Band::new(
            interval.mid_x,
            interval.end.x,
            Box::new(Polynomial::with_origin(right, interval.end.x)),
        ));
    }

    log::debug!(
        "interpolated {} control points into {} bands ({:?})",
        points.len(),
        bands.len(),
        options
    );
    PiecewiseFunction::new(bands)
}
