use crate::math::function::function::{
    Function,
    sealed
};

// ─────────────────────────────────────────────
// DampingRegime
// ─────────────────────────────────────────────

/// 依判別式 `c_dfx² - 4·c_fx` 的正負選定的解族。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DampingRegime {
    /// `λ·e^(r1·x) + μ·e^(r2·x) + h`
    Overdamped { r1: f64, r2: f64 },
    /// `(λ·cos(βx) + μ·sin(βx))·e^(αx) + h`
    Underdamped { alpha: f64, beta: f64 },
    /// `(λ + μ·x)·e^(r·x) + h`
    CriticallyDamped { r: f64 },
}

impl DampingRegime {
    fn from_coefficients(c_dfx: f64, discriminant: f64) -> DampingRegime {
        if discriminant > 0.0 {
            let root = discriminant.sqrt();
            DampingRegime::Overdamped {
                r1: (-c_dfx - root) / 2.0,
                r2: (-c_dfx + root) / 2.0,
            }
        } else if discriminant < 0.0 {
            DampingRegime::Underdamped {
                alpha: -c_dfx / 2.0,
                beta: (-discriminant).sqrt() / 2.0,
            }
        } else {
            DampingRegime::CriticallyDamped { r: -c_dfx / 2.0 }
        }
    }

    /// 齊次解的兩個基底 (u, v)。
    fn basis(&self, x: f64) -> (f64, f64) {
        match *self {
            DampingRegime::Overdamped { r1, r2 } => ((r1 * x).exp(), (r2 * x).exp()),
            DampingRegime::Underdamped { alpha, beta } => {
                let growth = (alpha * x).exp();
                let (sin, cos) = (beta * x).sin_cos();
                (growth * cos, growth * sin)
            },
            DampingRegime::CriticallyDamped { r } => {
                let growth = (r * x).exp();
                (growth, x * growth)
            }
        }
    }

    /// (u(x) - u(0), v(x) - v(0))，在 x = 0 附近不發生相消。
    fn basis_increment(&self, x: f64) -> (f64, f64) {
        match *self {
            DampingRegime::Overdamped { r1, r2 } => ((r1 * x).exp_m1(), (r2 * x).exp_m1()),
            DampingRegime::Underdamped { alpha, beta } => {
                let (sin, cos) = (beta * x).sin_cos();
                let half_sin = (0.5 * beta * x).sin();
                // e^(αx)·cos(βx) - 1 = (e^(αx) - 1)·cos(βx) + (cos(βx) - 1)
                (
                    (alpha * x).exp_m1() * cos - 2.0 * half_sin * half_sin,
                    (alpha * x).exp() * sin,
                )
            },
            DampingRegime::CriticallyDamped { r } => ((r * x).exp_m1(), x * (r * x).exp()),
        }
    }

    /// 對 `A·u + B·v` 微分後在同一組基底下的係數。
    fn differentiate(&self, (a, b): (f64, f64)) -> (f64, f64) {
        match *self {
            DampingRegime::Overdamped { r1, r2 } => (r1 * a, r2 * b),
            DampingRegime::Underdamped { alpha, beta } => (
                alpha * a + beta * b,
                alpha * b - beta * a,
            ),
            DampingRegime::CriticallyDamped { r } => (r * a + b, r * b),
        }
    }
}

// ─────────────────────────────────────────────
// SecondOrderOde
// ─────────────────────────────────────────────
//
//   f'' + c_dfx·f' + c_fx·f = constant,  f(0) = f0,  f'(0) = df0
//
// fx、dfx 以 x = 0 為錨點求值：
//   fx(x)  = f0  + λ ·(u(x) - u(0)) + μ ·(v(x) - v(0))
//   dfx(x) = df0 + λ'·(u(x) - u(0)) + μ'·(v(x) - v(0))
// 因此 fx(0) 與 dfx(0) 逐位元等於初始條件，與參數無關。

#[derive(Debug, Clone)]
pub struct SecondOrderOde {
    c_dfx: f64,
    c_fx: f64,
    constant: f64,
    df0: f64,
    f0: f64,
    h: f64,
    discriminant: f64,
    regime: DampingRegime,
    fx_coefs: (f64, f64),
    dfx_coefs: (f64, f64),
    d2fx_coefs: (f64, f64),
}

impl SecondOrderOde {
    pub fn new(c_dfx: f64, c_fx: f64, constant: f64, df0: f64, f0: f64) -> SecondOrderOde {
        let discriminant = c_dfx * c_dfx - 4.0 * c_fx;
        let mut ode = SecondOrderOde {
            c_dfx,
            c_fx,
            constant,
            df0,
            f0,
            h: 0.0,
            discriminant,
            regime: DampingRegime::from_coefficients(c_dfx, discriminant),
            fx_coefs: (0.0, 0.0),
            dfx_coefs: (0.0, 0.0),
            d2fx_coefs: (0.0, 0.0),
        };
        ode.compute();
        ode
    }

    /// 彈簧-阻尼-質量系統 `m·p'' + d·p' + k·p = force`。
    pub fn spring_damper_mass(stiffness: f64,
                              damping: f64,
                              mass: f64,
                              position: f64,
                              velocity: f64,
                              force: f64) -> SecondOrderOde {
        SecondOrderOde::new(damping / mass, stiffness / mass, force / mass, velocity, position)
    }

    /// 重設全部參數並重建所有衍生欄位。
    pub fn set(&mut self, c_dfx: f64, c_fx: f64, constant: f64, df0: f64, f0: f64) {
        self.c_dfx = c_dfx;
        self.c_fx = c_fx;
        self.constant = constant;
        self.df0 = df0;
        self.f0 = f0;
        self.compute();
    }

    fn compute(&mut self) {
        self.h = if self.constant != 0.0 {
            self.constant / self.c_fx
        } else {
            0.0
        };
        self.discriminant = self.c_dfx * self.c_dfx - 4.0 * self.c_fx;
        self.regime = DampingRegime::from_coefficients(self.c_dfx, self.discriminant);

        let c = self.f0 - self.h;
        self.fx_coefs = match self.regime {
            DampingRegime::Overdamped { r1, r2 } => {
                let lambda = (self.df0 - r2 * c) / (r1 - r2);
                (lambda, c - lambda)
            },
            DampingRegime::Underdamped { alpha, beta } => (c, (self.df0 - alpha * c) / beta),
            DampingRegime::CriticallyDamped { r } => (c, self.df0 - r * c),
        };
        self.dfx_coefs = self.regime.differentiate(self.fx_coefs);
        self.d2fx_coefs = self.regime.differentiate(self.dfx_coefs);

        log::debug!(
            "second order ode {:?}: discriminant = {}, lambda = {}, mu = {}",
            self.regime,
            self.discriminant,
            self.fx_coefs.0,
            self.fx_coefs.1
        );
    }

    pub fn c_dfx(&self) -> f64 {
        self.c_dfx
    }

    pub fn c_fx(&self) -> f64 {
        self.c_fx
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn df0(&self) -> f64 {
        self.df0
    }

    pub fn f0(&self) -> f64 {
        self.f0
    }

    /// 穩態偏移 `constant / c_fx`（constant 為 0 時為 0）。
    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn discriminant(&self) -> f64 {
        self.discriminant
    }

    pub fn regime(&self) -> DampingRegime {
        self.regime
    }

    pub fn lambda(&self) -> f64 {
        self.fx_coefs.0
    }

    pub fn mu(&self) -> f64 {
        self.fx_coefs.1
    }

    pub fn d2fx(&self, x: f64) -> f64 {
        let (u, v) = self.regime.basis(x);
        self.d2fx_coefs.0 * u + self.d2fx_coefs.1 * v
    }
}

impl sealed::Sealed for SecondOrderOde {}

impl Function for SecondOrderOde {
    fn fx(&self, x: f64) -> f64 {
        let (du, dv) = self.regime.basis_increment(x);
        self.f0 + (self.fx_coefs.0 * du + self.fx_coefs.1 * dv)
    }

    fn dfx(&self, x: f64) -> f64 {
        let (du, dv) = self.regime.basis_increment(x);
        self.df0 + (self.dfx_coefs.0 * du + self.dfx_coefs.1 * dv)
    }

    /// 導函數滿足齊次方程式，初始條件為 `g(0) = df0`、`g'(0) = f''(0)`。
    fn create_dfx_fn(&self) -> Box<dyn Function> {
        let d2f0 = self.constant - self.c_dfx * self.df0 - self.c_fx * self.f0;
        Box::new(SecondOrderOde::new(self.c_dfx, self.c_fx, 0.0, d2f0, self.df0))
    }

    fn add(&mut self, v: f64) {
        self.constant += self.c_fx * v;
        self.f0 += v;
        self.compute();
    }

    fn dup(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }
}
