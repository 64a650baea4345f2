//! 检查结果数据结构
//!
//! 定义单次轮询产生的结果类型，每次轮询重新生成，不保留历史

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单次检查结果
///
/// 与检查端点返回的JSON负载同构，端点返回的多余字段会被忽略。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// 检查是否通过
    pub success: bool,
    /// 原始结果负载
    #[serde(default)]
    pub data: serde_json::Value,
    /// 检查执行耗时（毫秒）
    #[serde(default)]
    pub duration: u64,
    /// 检查执行时间
    #[serde(default = "Utc::now")]
    pub datetime: DateTime<Utc>,
}

impl CheckResult {
    /// 由拉取异常合成的失败结果
    ///
    /// 负载为错误的字符串形式，耗时为0。这是轮询唯一的错误处理策略。
    ///
    /// # 参数
    /// * `message` - 错误的字符串形式
    ///
    /// # 返回
    /// * `Self` - 合成的失败结果
    pub fn synthetic_failure(message: String) -> Self {
        Self {
            success: false,
            data: serde_json::Value::String(message),
            duration: 0,
            datetime: Utc::now(),
        }
    }

    /// 转换为格式化JSON字符串
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_failure() {
        let result = CheckResult::synthetic_failure("connection refused".to_string());

        assert!(!result.success);
        assert_eq!(result.duration, 0);
        assert_eq!(
            result.data,
            serde_json::Value::String("connection refused".to_string())
        );
    }

    #[test]
    fn test_deserialize_check_payload() {
        // 检查端点返回的负载带有额外的检查项元数据字段
        let json = r#"{
            "project": "core",
            "name": "heartbeat",
            "success": true,
            "data": {"status": "ok"},
            "duration": 42,
            "datetime": "2024-03-01T12:00:00Z"
        }"#;

        let result: CheckResult = serde_json::from_str(json).unwrap();
        assert!(result.success);
        assert_eq!(result.duration, 42);
        assert_eq!(result.data["status"], "ok");
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let result: CheckResult = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!result.success);
        assert_eq!(result.duration, 0);
        assert!(result.data.is_null());
    }
}
