use crate::math::function::function::{
    Function,
    sealed
};

// ─────────────────────────────────────────────
// AffineTransform
// ─────────────────────────────────────────────
//
//   f(x) = y_mul·(y_add + inner(u)),  u = x_mul·(x_add + x)
//
// y_add 也會帶進 dfx / sfx 以及衍生出的包裝，因此
// create_sfx_fn(k).create_dfx_fn() 與原函數相同。

#[derive(Debug, Clone)]
pub struct AffineTransform {
    x_add: f64,
    x_mul: f64,
    y_add: f64,
    y_mul: f64,
    inner: Box<dyn Function>,
}

impl AffineTransform {
    pub fn new(inner: Box<dyn Function>,
               x_add: f64,
               x_mul: f64,
               y_add: f64,
               y_mul: f64) -> AffineTransform {
        AffineTransform { x_add, x_mul, y_add, y_mul, inner }
    }

    pub fn identity(inner: Box<dyn Function>) -> AffineTransform {
        AffineTransform::new(inner, 0.0, 1.0, 0.0, 1.0)
    }

    pub fn x_add(&self) -> f64 {
        self.x_add
    }

    pub fn x_mul(&self) -> f64 {
        self.x_mul
    }

    pub fn y_add(&self) -> f64 {
        self.y_add
    }

    pub fn y_mul(&self) -> f64 {
        self.y_mul
    }

    pub fn inner(&self) -> &dyn Function {
        self.inner.as_ref()
    }

    #[inline]
    fn inner_x(&self, x: f64) -> f64 {
        self.x_mul * (self.x_add + x)
    }

    fn wrap(&self, inner: Box<dyn Function>, y_mul: f64) -> Box<dyn Function> {
        Box::new(AffineTransform::new(inner, self.x_add, self.x_mul, self.y_add, y_mul))
    }
}

impl sealed::Sealed for AffineTransform {}

impl Function for AffineTransform {
    fn fx(&self, x: f64) -> f64 {
        self.y_mul * (self.y_add + self.inner.fx(self.inner_x(x)))
    }

    fn dfx(&self, x: f64) -> f64 {
        self.y_mul * self.x_mul * (self.y_add + self.inner.dfx(self.inner_x(x)))
    }

    fn sfx(&self, x: f64, constant: f64) -> f64 {
        (self.y_mul / self.x_mul) * (self.y_add + self.inner.sfx(self.inner_x(x), constant))
    }

    fn create_dfx_fn(&self) -> Box<dyn Function> {
        self.wrap(self.inner.create_dfx_fn(), self.y_mul * self.x_mul)
    }

    fn create_sfx_fn(&self, constant: f64) -> Box<dyn Function> {
        self.wrap(self.inner.create_sfx_fn(constant), self.y_mul / self.x_mul)
    }

    /// 內層對 `v / y_mul - y_add` 求解，再把每個內層根 u 映回 `u / x_mul - x_add`。
    fn solve_for(&self, v: f64) -> Option<Vec<f64>> {
        let inner_roots = self.inner.solve_for(v / self.y_mul - self.y_add)?;
        let mut roots: Vec<f64> = inner_roots
            .into_iter()
            .map(|u| u / self.x_mul - self.x_add)
            .collect();
        roots.sort_by(f64::total_cmp);
        Some(roots)
    }

    fn add(&mut self, v: f64) {
        self.y_add += v / self.y_mul;
    }

    fn dup(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }
}
