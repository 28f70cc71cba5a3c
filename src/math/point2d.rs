use serde::{
    Deserialize,
    Serialize
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// 兩點割線斜率；x 相同時依 IEEE-754 得到 `inf` 或 `NaN`。
    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_of_vertical_pair_is_not_finite() {
        let lhs = Point2D::new(1.0, 0.0);
        assert_eq!(Point2D::slope(&lhs, &Point2D::new(3.0, 4.0)), 2.0);
        assert_eq!(Point2D::slope(&lhs, &Point2D::new(1.0, 2.0)), f64::INFINITY);
        assert!(Point2D::slope(&lhs, &lhs).is_nan());
    }
}
