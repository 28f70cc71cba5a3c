use crate::math::function::function::Function;
use crate::math::point2d::Point2D;

/// 以固定步長對函數取樣的有限點列，可重複走訪。
///
/// 第 i 個點為 `(x_min + i·step, fx(x_min + i·step))`，
/// `i = 0..=floor((x_max - x_min) / step)`。`fx` 為 NaN 的點照樣產出，
/// 由使用端略過；`defined()` 直接濾掉這些點。
#[derive(Debug)]
pub struct Trace<'a> {
    function: &'a dyn Function,
    x_min: f64,
    step: f64,
    count: usize,
}

impl<'a> Trace<'a> {
    /// 步長非正、非有限，或 `x_max < x_min` 時點列為空。
    pub fn new(function: &'a dyn Function, x_min: f64, x_max: f64, step: f64) -> Trace<'a> {
        let valid = step.is_finite()
            && step > 0.0
            && x_min.is_finite()
            && x_max.is_finite()
            && x_max >= x_min;
        let count = if valid {
            let steps = ((x_max - x_min) / step).floor();
            // 步數超出 usize 時截在 usize::MAX
            if steps >= usize::MAX as f64 {
                usize::MAX
            } else {
                steps as usize + 1
            }
        } else {
            0
        };
        Trace { function, x_min, step, count }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> TraceIter<'a> {
        TraceIter {
            function: self.function,
            x_min: self.x_min,
            step: self.step,
            index: 0,
            count: self.count,
        }
    }

    pub fn defined(&self) -> impl Iterator<Item = Point2D> + 'a {
        self.iter().filter(|point| !point.y().is_nan())
    }
}

impl<'a> IntoIterator for &Trace<'a> {
    type Item = Point2D;
    type IntoIter = TraceIter<'a>;

    fn into_iter(self) -> TraceIter<'a> {
        self.iter()
    }
}

#[derive(Debug)]
pub struct TraceIter<'a> {
    function: &'a dyn Function,
    x_min: f64,
    step: f64,
    index: usize,
    count: usize,
}

impl Iterator for TraceIter<'_> {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        if self.index >= self.count {
            return None;
        }
        let x = f64::mul_add(self.index as f64, self.step, self.x_min);
        self.index += 1;
        Some(Point2D::new(x, self.function.fx(x)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TraceIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::piecewisefunction::{
        Band,
        PiecewiseFunction
    };
    use crate::math::function::polynomial::Polynomial;

    #[test]
    fn samples_include_both_ends() {
        let line = Polynomial::new(vec![1.0, 2.0]);
        let trace = Trace::new(&line, 0.0, 2.0, 0.5);
        assert_eq!(trace.len(), 5);
        let points: Vec<Point2D> = trace.iter().collect();
        assert_eq!(points.first(), Some(&Point2D::new(0.0, 1.0)));
        assert_eq!(points.last(), Some(&Point2D::new(2.0, 5.0)));
    }

    #[test]
    fn partial_last_step_is_dropped() {
        let line = Polynomial::new(vec![0.0, 1.0]);
        let trace = Trace::new(&line, 0.0, 1.0, 0.4);
        let xs: Vec<f64> = trace.iter().map(|p| p.x()).collect();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[1], 0.4);
        assert!(xs[2] < 1.0);
    }

    #[test]
    fn trace_can_be_walked_again() {
        let square = Polynomial::new(vec![0.0, 0.0, 1.0]);
        let trace = Trace::new(&square, -1.0, 1.0, 0.25);
        let first: Vec<Point2D> = trace.iter().collect();
        let second: Vec<Point2D> = (&trace).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(trace.iter().len(), 9);
    }

    #[test]
    fn nan_points_are_yielded_and_skippable() {
        let f = PiecewiseFunction::new(vec![
            Band::new(0.0, 1.0, Box::new(Polynomial::new(vec![1.0]))),
            Band::new(2.0, 3.0, Box::new(Polynomial::new(vec![2.0]))),
        ]);
        let trace = Trace::new(&f, 0.0, 3.0, 0.5);
        assert_eq!(trace.len(), 7);
        assert_eq!(trace.iter().filter(|p| p.y().is_nan()).count(), 1);
        let defined: Vec<f64> = trace.defined().map(|p| p.x()).collect();
        assert_eq!(defined, vec![0.0, 0.5, 1.0, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn degenerate_ranges_are_empty() {
        let line = Polynomial::new(vec![0.0, 1.0]);
        assert!(Trace::new(&line, 0.0, 1.0, 0.0).is_empty());
        assert!(Trace::new(&line, 0.0, 1.0, -0.1).is_empty());
        assert!(Trace::new(&line, 0.0, 1.0, f64::NAN).is_empty());
        assert!(Trace::new(&line, 1.0, 0.0, 0.1).is_empty());
        assert!(Trace::new(&line, 0.0, f64::INFINITY, 0.1).is_empty());
        assert_eq!(Trace::new(&line, 0.5, 0.5, 1.0).iter().count(), 1);
    }

    #[test]
    fn tiny_step_saturates_sample_count() {
        let line = Polynomial::new(vec![0.0, 1.0]);
        let trace = Trace::new(&line, 0.0, 1.0, 1e-300);
        assert_eq!(trace.len(), usize::MAX);
        let head: Vec<Point2D> = trace.iter().take(2).collect();
        assert_eq!(head, vec![Point2D::new(0.0, 0.0), Point2D::new(1e-300, 1e-300)]);

        let wide = Trace::new(&line, -f64::MAX, f64::MAX, 1e-10);
        assert_eq!(wide.len(), usize::MAX);
        assert_eq!(wide.iter().next().map(|p| p.x()), Some(-f64::MAX));
    }

    #[test]
    fn trace_is_debug() {
        let line = Polynomial::new(vec![0.0, 1.0]);
        let trace = Trace::new(&line, 0.0, 1.0, 0.5);
        assert!(format!("{:?}", trace).contains("Polynomial"));
        assert!(format!("{:?}", trace.iter()).contains("TraceIter"));
    }
}
