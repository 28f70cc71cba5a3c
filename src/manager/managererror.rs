use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
    #[error("key '{0}' not found")]
    NameNotFoundError(String)
}

/// 把 JSON 值反序列化成 `T`，失敗時轉成 `ManagerError::JsonParseError`。
pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
    where T: for<'a> Deserialize<'a> {
    Ok(serde_json::from_value(json_value)?)
}
