use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use serde_json;

use super::managererror::{
    ManagerError,
    parse_json_value
};

// ─────────────────────────────────────────────────────────────────────────────
// ManagerBuilder / FrozenManager
// ─────────────────────────────────────────────────────────────────────────────
//
// 載入期間以 ManagerBuilder 累積具名物件，載入完成後 build() 成唯讀的
// FrozenManager。值以 Arc 共享，FrozenManager 可在執行緒間傳遞。

pub struct ManagerBuilder<V: ?Sized> {
    map: HashMap<String, Arc<V>>
}

impl<V: ?Sized> ManagerBuilder<V> {
    pub fn new() -> ManagerBuilder<V> {
        ManagerBuilder { map: HashMap::new() }
    }

    /// 同名物件會被覆蓋。
    pub fn insert(&mut self, name: String, value: Arc<V>) {
        self.map.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Result<Arc<V>, ManagerError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::NameNotFoundError(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn build(self) -> FrozenManager<V> {
        FrozenManager { map: self.map }
    }
}

impl<V: ?Sized> Default for ManagerBuilder<V> {
    fn default() -> Self {
        ManagerBuilder::new()
    }
}

pub struct FrozenManager<V: ?Sized> {
    map: HashMap<String, Arc<V>>
}

impl<V: ?Sized> FrozenManager<V> {
    pub fn get(&self, name: &str) -> Result<Arc<V>, ManagerError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::NameNotFoundError(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// 依字母序排列的名稱。
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IManager
// ─────────────────────────────────────────────────────────────────────────────

/// 從 JSON 建立具名物件並放進 `ManagerBuilder` 的載入器。
///
/// `S` 是建構時需要的外部依賴（其他已凍結的 manager 等），不需要時為 `()`。
pub trait IManager<V: ?Sized, S> {
    fn insert_obj_from_json(&self,
                            builder: &mut ManagerBuilder<V>,
                            json_value: serde_json::Value,
                            supports: &S) -> Result<(), ManagerError>;

    fn insert_obj_from_json_vec(&self,
                                builder: &mut ManagerBuilder<V>,
                                json_vec: &[serde_json::Value],
                                supports: &S) -> Result<(), ManagerError> {
        for json_value in json_vec.iter() {
            self.insert_obj_from_json(builder, json_value.clone(), supports)?;
        }
        Ok(())
    }

    /// 檔案內容可以是單一物件或物件陣列。
    fn from_reader(&self,
                   builder: &mut ManagerBuilder<V>,
                   file_path: &str,
                   supports: &S) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = parse_json_value(json_value)?;
            self.insert_obj_from_json_vec(builder, &json_array, supports)
        } else {
            self.insert_obj_from_json(builder, json_value, supports)
        }
    }
}
