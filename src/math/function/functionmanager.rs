use std::sync::Arc;

use serde::Deserialize;
use serde_json;

use crate::manager::manager::{
    IManager,
    ManagerBuilder
};
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::manager::namedobject::NamedJsonObject;
use crate::math::function::affinetransform::AffineTransform;
use crate::math::function::function::Function;
use crate::math::function::interpolation::{
    ControlPoint,
    InterpolationOptions,
    interpolate
};
use crate::math::function::piecewisefunction::{
    Band,
    PiecewiseFunction
};
use crate::math::function::polynomial::Polynomial;
use crate::math::function::secondorderode::SecondOrderOde;

// ─────────────────────────────────────────────────────────────────────────────
// JSON props
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
enum FunctionType {
    Polynomial,
    Piecewise,
    Interpolated,
    Affine,
    SecondOrderOde,
    SpringDamperMass
}

#[derive(Deserialize)]
struct FunctionTypedObject {
    function_type: FunctionType
}

#[derive(Deserialize)]
struct PolynomialJsonProp {
    coefficients: Vec<f64>,
    #[serde(default)]
    origin: f64
}

#[derive(Deserialize)]
struct InterpolatedJsonProp {
    points: Vec<ControlPoint>,
    #[serde(default)]
    options: InterpolationOptions
}

fn one() -> f64 {
    1.0
}

/// `inner` 為另一個已載入函數的名稱；省略的參數取恆等值。
#[derive(Deserialize)]
struct AffineJsonProp {
    inner: String,
    #[serde(default)]
    x_add: f64,
    #[serde(default = "one")]
    x_mul: f64,
    #[serde(default)]
    y_add: f64,
    #[serde(default = "one")]
    y_mul: f64
}

#[derive(Deserialize)]
struct BandJsonProp {
    min: f64,
    max: f64,
    function: String
}

#[derive(Deserialize)]
struct PiecewiseJsonProp {
    bands: Vec<BandJsonProp>
}

#[derive(Deserialize)]
struct SecondOrderOdeJsonProp {
    c_dfx: f64,
    c_fx: f64,
    #[serde(default)]
    constant: f64,
    df0: f64,
    f0: f64
}

#[derive(Deserialize)]
struct SpringDamperMassJsonProp {
    stiffness: f64,
    damping: f64,
    mass: f64,
    position: f64,
    velocity: f64,
    #[serde(default)]
    force: f64
}

type FunctionBuilder = ManagerBuilder<dyn Function>;

/// 參照的函數以 `dup` 深拷貝，載入後彼此不共享狀態。
fn get_referenced_function(builder: &FunctionBuilder, name: &str) -> Result<Box<dyn Function>, ManagerError> {
    Ok(builder.get(name)?.dup())
}

fn get_function_from_json(builder: &FunctionBuilder,
                          json_value: serde_json::Value) -> Result<Arc<dyn Function>, ManagerError> {
    let typed_object: FunctionTypedObject = parse_json_value(json_value.clone())?;
    let function: Arc<dyn Function> = match typed_object.function_type {
        FunctionType::Polynomial => {
            let json_prop: PolynomialJsonProp = parse_json_value(json_value)?;
            Arc::new(Polynomial::with_origin(json_prop.coefficients, json_prop.origin))
        },
        FunctionType::Interpolated => {
            let json_prop: InterpolatedJsonProp = parse_json_value(json_value)?;
            Arc::new(interpolate(json_prop.points, json_prop.options))
        },
        FunctionType::Affine => {
            let json_prop: AffineJsonProp = parse_json_value(json_value)?;
            let inner = get_referenced_function(builder, &json_prop.inner)?;
            Arc::new(AffineTransform::new(
                inner,
                json_prop.x_add,
                json_prop.x_mul,
                json_prop.y_add,
                json_prop.y_mul
            ))
        },
        FunctionType::Piecewise => {
            let json_prop: PiecewiseJsonProp = parse_json_value(json_value)?;
            let mut bands = Vec::with_capacity(json_prop.bands.len());
            for band in json_prop.bands {
                let function = get_referenced_function(builder, &band.function)?;
                bands.push(Band::new(band.min, band.max, function));
            }
            Arc::new(PiecewiseFunction::new(bands))
        },
        FunctionType::SecondOrderOde => {
            let json_prop: SecondOrderOdeJsonProp = parse_json_value(json_value)?;
            Arc::new(SecondOrderOde::new(
                json_prop.c_dfx,
                json_prop.c_fx,
                json_prop.constant,
                json_prop.df0,
                json_prop.f0
            ))
        },
        FunctionType::SpringDamperMass => {
            let json_prop: SpringDamperMassJsonProp = parse_json_value(json_value)?;
            Arc::new(SecondOrderOde::spring_damper_mass(
                json_prop.stiffness,
                json_prop.damping,
                json_prop.mass,
                json_prop.position,
                json_prop.velocity,
                json_prop.force
            ))
        }
    };
    Ok(function)
}

// ─────────────────────────────────────────────────────────────────────────────
// FunctionLoader
// ─────────────────────────────────────────────────────────────────────────────

/// 具名函數的載入器，實作 `IManager<dyn Function, ()>`。
///
/// `Affine` 與 `Piecewise` 以名稱參照其他函數，而 JSON 陣列中的順序不一定
/// 在被參照者之後。`insert_obj_from_json_vec` 因此以 retry loop 處理：
/// 每輪把失敗的 index 留到下一輪，直到全部成功，或某一輪完全沒有進展
/// （循環參照、名稱打錯、格式錯誤），此時回傳最後一個錯誤。
pub struct FunctionLoader;

impl IManager<dyn Function, ()> for FunctionLoader {
    fn insert_obj_from_json(&self,
                            builder: &mut FunctionBuilder,
                            json_value: serde_json::Value,
                            _supports: &()) -> Result<(), ManagerError> {
        let named_obj: NamedJsonObject = parse_json_value(json_value.clone())?;
        let function = get_function_from_json(builder, json_value)?;
        log::debug!("function '{}' registered: {:?}", named_obj.name(), function);
        builder.insert(named_obj.name().to_owned(), function);
        Ok(())
    }

    fn insert_obj_from_json_vec(&self,
                                builder: &mut FunctionBuilder,
                                json_vec: &[serde_json::Value],
                                supports: &()) -> Result<(), ManagerError> {
        let mut remain_indices: Vec<usize> = (0..json_vec.len()).collect();
        let mut result: Result<(), ManagerError> = Ok(());

        loop {
            let mut new_remain_indices: Vec<usize> = Vec::new();

            for &index in remain_indices.iter() {
                let attempt = self.insert_obj_from_json(builder, json_vec[index].clone(), supports);
                if attempt.is_err() {
                    new_remain_indices.push(index);
                    result = attempt;
                }
            }

            if new_remain_indices.is_empty() {
                return Ok(());
            }
            if remain_indices == new_remain_indices {
                return result;
            }

            remain_indices = new_remain_indices;
        }
    }
}
