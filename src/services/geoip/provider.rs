//! GeoIP 查询抽象层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;

/// 上游返回成功时 `status` 字段的取值
pub const STATUS_SUCCESS: &str = "success";

/// 上游返回的原始地理位置记录
///
/// 不做任何字段映射，序列化时原样输出，保证透传。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoRecord(Map<String, Value>);

impl GeoRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// 上游的 `status` 字段；字段缺失或不是字符串时为 None
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn has_status(&self) -> bool {
        self.0.contains_key("status")
    }

    pub fn is_success(&self) -> bool {
        self.status() == Some(STATUS_SUCCESS)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// 取字段值，缺失时返回 `default`
    pub fn field_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.0.get(key).cloned().unwrap_or_else(|| default.into())
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for GeoRecord {
    type Error = Value;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// GeoIP 查询 trait
#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    /// 查询 IP 地址的地理位置
    ///
    /// 只有传输或解析失败才返回 Err；上游的 `status: fail` 属于正常返回。
    async fn fetch(&self, ip: &str) -> Result<GeoRecord>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_helpers() {
        let record = GeoRecord::try_from(json!({"status": "success", "country": "US"})).unwrap();
        assert!(record.has_status());
        assert!(record.is_success());

        let failed = GeoRecord::try_from(json!({"status": "fail", "message": "private range"})).unwrap();
        assert_eq!(failed.status(), Some("fail"));
        assert!(!failed.is_success());

        let missing = GeoRecord::try_from(json!({"country": "US"})).unwrap();
        assert!(!missing.has_status());
        assert_eq!(missing.status(), None);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(GeoRecord::try_from(json!(["status", "success"])).is_err());
        assert!(GeoRecord::try_from(json!("success")).is_err());
    }

    #[test]
    fn test_field_or_keeps_present_values() {
        let record = GeoRecord::try_from(json!({"zip": "", "lat": 1.5, "city": null})).unwrap();
        assert_eq!(record.field_or("zip", "N/A"), json!(""));
        assert_eq!(record.field_or("lat", 0), json!(1.5));
        assert_eq!(record.field_or("city", "N/A"), Value::Null);
        assert_eq!(record.field_or("isp", "N/A"), json!("N/A"));
        assert_eq!(record.field_or("lon", 0), json!(0));
    }

    #[test]
    fn test_serializes_transparently() {
        let raw = json!({"status": "success", "query": "8.8.8.8", "lat": 37.4});
        let record = GeoRecord::try_from(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }
}
