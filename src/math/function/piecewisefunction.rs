use crate::math::function::function::{
    Function,
    sealed
};

// ─────────────────────────────────────────────
// Band
// ─────────────────────────────────────────────

/// 一段 `[min, max]` 與其上的子函數，由容器獨佔擁有。
#[derive(Debug, Clone)]
pub struct Band {
    min: f64,
    max: f64,
    function: Box<dyn Function>,
}

impl Band {
    pub fn new(min: f64, max: f64, function: Box<dyn Function>) -> Band {
        Band { min, max, function }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn function(&self) -> &dyn Function {
        self.function.as_ref()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }
}

// ─────────────────────────────────────────────
// PiecewiseFunction
// ─────────────────────────────────────────────
//
// bands 依 min 遞增排序。查詢採線性掃描，第一個包含 x 的 band 勝出，
// 因此共用邊界上由左側 band 負責。band 數量通常很少，改成二分搜尋不會改變
// 可觀察行為。
//
// 手動組裝時 band 是否相接由呼叫端負責；落在所有 band 之外的 x 求值為 NaN。

#[derive(Debug, Clone, Default)]
pub struct PiecewiseFunction {
    bands: Vec<Band>,
}

impl PiecewiseFunction {
    pub fn new(mut bands: Vec<Band>) -> PiecewiseFunction {
        bands.sort_by(|lhs, rhs| lhs.min.total_cmp(&rhs.min));
        PiecewiseFunction { bands }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// 插入並維持依 min 排序（相同 min 時排在既有 band 之後）。
    pub fn push(&mut self, band: Band) {
        let index = self.bands.partition_point(|b| b.min.total_cmp(&band.min).is_le());
        self.bands.insert(index, band);
    }

    pub fn min_x(&self) -> f64 {
        self.bands.first().map_or(f64::NAN, |b| b.min)
    }

    pub fn max_x(&self) -> f64 {
        self.bands
            .iter()
            .map(|b| b.max)
            .reduce(f64::max)
            .unwrap_or(f64::NAN)
    }

    fn find_band(&self, x: f64) -> Option<&Band> {
        self.bands.iter().find(|b| b.contains(x))
    }
}

impl sealed::Sealed for PiecewiseFunction {}

impl Function for PiecewiseFunction {
    fn fx(&self, x: f64) -> f64 {
        self.find_band(x).map_or(f64::NAN, |b| b.function.fx(x))
    }

    fn dfx(&self, x: f64) -> f64 {
        self.find_band(x).map_or(f64::NAN, |b| b.function.dfx(x))
    }

    /// 與 `create_sfx_fn(constant).fx(x)` 相同的拼接規則，但不建立新物件：
    /// 第 0 段使用 `constant`，之後每段平移
    ///   running - band.sfx(band.min, 0)
    /// 其中 running 為前一段拼接後在其右端的值。
    fn sfx(&self, x: f64, constant: f64) -> f64 {
        let mut running = f64::NAN;
        for (i, band) in self.bands.iter().enumerate() {
            let (k, shift) = if i == 0 {
                (constant, 0.0)
            } else {
                (0.0, running - band.function.sfx(band.min, 0.0))
            };
            if band.contains(x) {
                return band.function.sfx(x, k) + shift;
            }
            running = band.function.sfx(band.max, k) + shift;
        }
        f64::NAN
    }

    fn create_dfx_fn(&self) -> Box<dyn Function> {
        let bands = self.bands
            .iter()
            .map(|b| Band::new(b.min, b.max, b.function.create_dfx_fn()))
            .collect();
        Box::new(PiecewiseFunction { bands })
    }

    /// 逐段建立反導函數並以 `add` 原地平移，使整體在每個邊界上連續。
    fn create_sfx_fn(&self, constant: f64) -> Box<dyn Function> {
        let mut bands = Vec::with_capacity(self.bands.len());
        let mut running = f64::NAN;
        for (i, band) in self.bands.iter().enumerate() {
            let sfx_fn = if i == 0 {
                band.function.create_sfx_fn(constant)
            } else {
                let mut sfx_fn = band.function.create_sfx_fn(0.0);
                let shift = running - sfx_fn.fx(band.min);
                sfx_fn.add(shift);
                sfx_fn
            };
            running = sfx_fn.fx(band.max);
            bands.push(Band::new(band.min, band.max, sfx_fn));
        }
        Box::new(PiecewiseFunction { bands })
    }

    /// 每段各自求解，只保留落在該段 `[min, max]` 內的根，依 band 順序串接。
    /// 彙總為空時回傳 `None`。根恰好落在共用邊界時兩側 band 都會回報。
    ///
    /// 某段整段都等於 v（子函數回傳 `None` 且兩端點的值皆為 v）時，
    /// 以該段的 `min`、`max` 作為代表解回報。
    fn solve_for(&self, v: f64) -> Option<Vec<f64>> {
        let mut roots: Vec<f64> = Vec::new();
        for band in self.bands.iter() {
            match band.function.solve_for(v) {
                Some(band_roots) => {
                    roots.extend(band_roots.into_iter().filter(|&x| band.contains(x)));
                },
                None if band.function.fx(band.min) == v && band.function.fx(band.max) == v => {
                    roots.push(band.min);
                    if band.max != band.min {
                        roots.push(band.max);
                    }
                },
                None => {}
            }
        }
        if roots.is_empty() {
            None
        } else {
            Some(roots)
        }
    }

    fn add(&mut self, v: f64) {
        for band in self.bands.iter_mut() {
            band.function.add(v);
        }
    }

    fn dup(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }
}
