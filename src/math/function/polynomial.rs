use crate::math::function::function::{
    Function,
    sealed
};
use crate::math::function::rootfinding::{
    antiderivative_coefs,
    derivative_coefs,
    horner,
    real_roots
};

// ─────────────────────────────────────────────
// Polynomial
// ─────────────────────────────────────────────
//
// 係數升冪排列並以 origin 為展開點：
//   p(x) = Σ c_i·(x - origin)^i
//
// origin 預設為 0，即一般的 dense coefficient vector。
// spline 的每一段以控制點為 origin，在控制點上求值時 Horner 只剩常數項，
// 因此插值結果逐位元等於控制點的值。

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefs: Vec<f64>,
    origin: f64,
}

impl Polynomial {
    pub fn new(coefs: Vec<f64>) -> Polynomial {
        Polynomial { coefs, origin: 0.0 }
    }

    pub fn with_origin(coefs: Vec<f64>, origin: f64) -> Polynomial {
        Polynomial { coefs, origin }
    }

    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    pub fn degree(&self) -> usize {
        self.coefs.len().saturating_sub(1)
    }
}

impl sealed::Sealed for Polynomial {}

impl Function for Polynomial {
    fn fx(&self, x: f64) -> f64 {
        horner(&self.coefs, x - self.origin)
    }

    fn dfx(&self, x: f64) -> f64 {
        let x_diff = x - self.origin;
        self.coefs
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (i, &c)| f64::mul_add(acc, x_diff, i as f64 * c))
    }

    /// k + Σ c_i·t^(i+1)/(i+1)，t = x - origin。
    fn sfx(&self, x: f64, constant: f64) -> f64 {
        let x_diff = x - self.origin;
        let sum = self.coefs
            .iter()
            .enumerate()
            .rev()
            .fold(0.0, |acc, (i, &c)| f64::mul_add(acc, x_diff, c / (i + 1) as f64));
        f64::mul_add(sum, x_diff, constant)
    }

    fn create_dfx_fn(&self) -> Box<dyn Function> {
        Box::new(Polynomial::with_origin(derivative_coefs(&self.coefs), self.origin))
    }

    fn create_sfx_fn(&self, constant: f64) -> Box<dyn Function> {
        Box::new(Polynomial::with_origin(
            antiderivative_coefs(&self.coefs, constant),
            self.origin,
        ))
    }

    /// 次數 ≤ 2 用封閉解，更高次以 Brent 法逐段求根（見 `rootfinding`）。
    /// 常數多項式恰等於 v 時每個 x 都是解，回傳 `None`。
    fn solve_for(&self, v: f64) -> Option<Vec<f64>> {
        let mut shifted = if self.coefs.is_empty() {
            vec![0.0]
        } else {
            self.coefs.clone()
        };
        shifted[0] -= v;
        real_roots(&shifted).map(|roots| {
            roots.into_iter().map(|root| root + self.origin).collect()
        })
    }

    fn add(&mut self, v: f64) {
        match self.coefs.first_mut() {
            Some(c0) => *c0 += v,
            None => self.coefs.push(v),
        }
    }

    fn dup(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }
}
