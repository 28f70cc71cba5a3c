use std::fmt::Debug;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// 一維實函數的共同能力介面。
///
/// 四種變體（`Polynomial`、`PiecewiseFunction`、`AffineTransform`、
/// `SecondOrderOde`）共用此介面，彼此可任意巢狀組合。
///
/// # 錯誤語意
/// - 定義域外求值：回傳 `NaN`，不 panic。
/// - 呼叫變體未提供的操作：直接 panic（屬於呼叫端的程式錯誤，不是資料問題）。
///   未覆寫的預設實作即為此 panic 路徑。
pub trait Function: sealed::Sealed + Debug + Send + Sync {
    fn fx(&self, x: f64) -> f64;

    fn dfx(&self, x: f64) -> f64;

    /// 在 x 處的反導函數值，積分常數 `constant` 定在第一個取樣點。
    fn sfx(&self, x: f64, constant: f64) -> f64 {
        let _ = (x, constant);
        unsupported::<Self>("sfx")
    }

    /// 建立代表整條導函數的新函數物件（不只是點求值）。
    fn create_dfx_fn(&self) -> Box<dyn Function> {
        unsupported::<Self>("create_dfx_fn")
    }

    fn create_sfx_fn(&self, constant: f64) -> Box<dyn Function> {
        let _ = constant;
        unsupported::<Self>("create_sfx_fn")
    }

    /// 所有滿足 `fx(x) == v` 的 x。
    ///
    /// `None` 代表「無法列舉出解」（找不到解，或常數函數在每個 x 都成立），
    /// 與「已求解且為空」的 `Some(vec![])` 不同。
    fn solve_for(&self, v: f64) -> Option<Vec<f64>> {
        let _ = v;
        unsupported::<Self>("solve_for")
    }

    /// 原地平移輸出：`f(x) := f(x) + v`。
    fn add(&mut self, v: f64);

    fn sub(&mut self, v: f64) {
        self.add(-v);
    }

    fn dup(&self) -> Box<dyn Function>;
}

impl Clone for Box<dyn Function> {
    fn clone(&self) -> Self {
        self.dup()
    }
}

fn unsupported<T: ?Sized>(operation: &str) -> ! {
    panic!(
        "{} is not supported by {}",
        operation,
        std::any::type_name::<T>()
    )
}
