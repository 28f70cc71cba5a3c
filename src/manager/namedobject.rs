use serde::Deserialize;

/// 每個 JSON 物件共有的 `name` 欄位。
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
