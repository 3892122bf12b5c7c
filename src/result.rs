use serde::Serialize;

pub const SUCCESS: i32 = 1;
pub const FAILURE: i32 = 0;

/// Uniform response envelope returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResult<T> {
    pub code: i32,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS,
            msg: None,
            data: Some(data),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            code: FAILURE,
            msg: Some(msg.into()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }
}

impl ApiResult<()> {
    /// Success without a payload.
    pub fn ok() -> Self {
        Self {
            code: SUCCESS,
            msg: None,
            data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub total: u64,
    pub records: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let result = ApiResult::success(42);
        assert!(result.is_success());
        assert_eq!(result.data, Some(42));
        assert!(result.msg.is_none());
    }

    #[test]
    fn test_ok_serializes_null_data() {
        let json = serde_json::to_value(ApiResult::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"code": 1, "msg": null, "data": null}));
    }

    #[test]
    fn test_error_envelope() {
        let result = ApiResult::<String>::error("account is locked");
        assert!(!result.is_success());
        assert_eq!(result.msg.as_deref(), Some("account is locked"));
        assert!(result.data.is_none());
    }

    #[test]
    fn test_page_result_shape() {
        let page = PageResult {
            total: 12,
            records: vec!["a", "b"],
        };
        let json = serde_json::to_value(ApiResult::success(page)).unwrap();
        assert_eq!(json["data"]["total"], 12);
        assert_eq!(json["data"]["records"].as_array().unwrap().len(), 2);
    }
}
