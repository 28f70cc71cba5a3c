use approx::assert_abs_diff_eq;
use serde_json::json;

use fnalgebra::configuration::Configuration;
use fnalgebra::manager::managererror::ManagerError;

const FUNCTIONS_JSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/json/functions.json");

#[test]
fn sample_catalogue_loads_every_entry() {
    let config = Configuration::from_reader(FUNCTIONS_JSON).unwrap();
    assert_eq!(
        config.function_manager().names(),
        vec!["ode", "peak", "quadratic", "spring", "steps", "wide_peak"]
    );
}

#[test]
fn sample_catalogue_values() {
    let config = Configuration::from_reader(FUNCTIONS_JSON).unwrap();

    let peak = config.function("peak").unwrap();
    assert_eq!(peak.fx(1.0), 1.0);
    assert_eq!(peak.fx(3.0), 5.0);
    assert_eq!(peak.fx(5.0), 1.0);

    // 依名稱參照、且在檔案中排在被參照者之前
    let wide_peak = config.function("wide_peak").unwrap();
    assert_eq!(wide_peak.fx(6.0), 5.0);
    assert_abs_diff_eq!(wide_peak.dfx(6.0), 0.0, epsilon = 1e-12);

    let steps = config.function("steps").unwrap();
    assert_eq!(steps.fx(0.5), 2.75);
    assert_eq!(steps.fx(1.0), 6.0);
    assert_eq!(steps.fx(2.0), 4.0);
    assert!(steps.fx(5.5).is_nan());

    let spring = config.function("spring").unwrap();
    assert_eq!(spring.fx(0.0), -1.0);
    assert_eq!(spring.dfx(0.0), -3.0);

    let ode = config.function("ode").unwrap();
    assert_abs_diff_eq!(ode.fx(2.0), 2.0 * (-2.0f64).exp(), epsilon = 1e-15);
}

#[test]
fn owned_copies_do_not_touch_the_catalogue() {
    let config = Configuration::from_reader(FUNCTIONS_JSON).unwrap();
    let mut quadratic = config.function_owned("quadratic").unwrap();
    quadratic.sub(1.0);
    assert_eq!(quadratic.fx(0.0), 0.0);
    assert_eq!(config.function("quadratic").unwrap().fx(0.0), 1.0);
}

#[test]
fn unknown_name_is_reported() {
    let config = Configuration::from_reader(FUNCTIONS_JSON).unwrap();
    let error = config.function("missing").err().unwrap();
    assert_eq!(error.to_string(), "key 'missing' not found");
}

#[test]
fn missing_file_is_an_io_error() {
    let result = Configuration::from_reader("json/does_not_exist.json");
    assert!(matches!(result, Err(ManagerError::IOError(_))));
}

#[test]
fn empty_configuration() {
    let config = Configuration::from_json_value(json!({})).unwrap();
    assert!(config.function_manager().is_empty());
    assert!(Configuration::default().function_manager().is_empty());
}

#[test]
fn cyclic_references_fail() {
    let result = Configuration::from_json_value(json!({
        "functions": [
            {"name": "a", "function_type": "Affine", "inner": "b"},
            {"name": "b", "function_type": "Affine", "inner": "a"}
        ]
    }));
    assert!(matches!(result, Err(ManagerError::NameNotFoundError(_))));
}

#[test]
fn malformed_entry_is_a_parse_error() {
    let result = Configuration::from_json_value(json!({
        "functions": [
            {"name": "q", "function_type": "Polynomial", "coefficients": "1, 2"}
        ]
    }));
    assert!(matches!(result, Err(ManagerError::JsonParseError(_))));
}
