use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use serde::Deserialize;

use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::manager::manager::{
    FrozenManager,
    IManager,
    ManagerBuilder
};
use crate::math::function::function::Function;
use crate::math::function::functionmanager::FunctionLoader;


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    functions: Vec<serde_json::Value>
}

/// 載入完成、唯讀的函數目錄。
pub struct Configuration {
    function_manager: FrozenManager<dyn Function>
}


impl Configuration {
    pub fn new() -> Configuration {
        Configuration { function_manager: ManagerBuilder::new().build() }
    }

    pub fn function_manager(&self) -> &FrozenManager<dyn Function> {
        &self.function_manager
    }

    /// 共享的唯讀函數。
    pub fn function(&self, name: &str) -> Result<Arc<dyn Function>, ManagerError> {
        self.function_manager.get(name)
    }

    /// 可自由修改（`add`/`sub`）的獨立副本。
    pub fn function_owned(&self, name: &str) -> Result<Box<dyn Function>, ManagerError> {
        Ok(self.function_manager.get(name)?.dup())
    }

    pub fn from_json_value(json_value: serde_json::Value) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = parse_json_value(json_value)?;
        Configuration::from_json_prop(json_prop)
    }

    pub fn from_reader(file_path: &str) -> Result<Configuration, ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        Configuration::from_json_prop(json_prop)
    }

    fn from_json_prop(json_prop: ConfigurationJsonProp) -> Result<Configuration, ManagerError> {
        let mut function_builder = ManagerBuilder::new();
        FunctionLoader.insert_obj_from_json_vec(&mut function_builder, &json_prop.functions, &())?;
        log::debug!("configuration loaded with {} functions", json_prop.functions.len());
        Ok(Configuration { function_manager: function_builder.build() })
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
