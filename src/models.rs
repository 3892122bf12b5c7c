use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATUS_ENABLE: i32 = 1;
pub const STATUS_DISABLE: i32 = 0;

pub const DEFAULT_PASSWORD: &str = "123456";
pub const MASKED_PASSWORD: &str = "****";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub password: String,
    pub phone: String,
    pub sex: String,
    pub id_number: String,
    pub status: i32,
    #[serde(with = "minute_format")]
    pub create_time: NaiveDateTime,
    #[serde(with = "minute_format")]
    pub update_time: NaiveDateTime,
    pub create_user: Option<i64>,
    pub update_user: Option<i64>,
}

/// Body of the create and update endpoints. On update, absent optional fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct EmployeeLoginDto {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for EmployeeLoginDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeLoginDto")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeLoginVo {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePageQueryDto {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub name: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// The `id` of the enable/disable endpoint, taken from the query string or a form body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusParam {
    pub id: i64,
}

/// Employee id carried by a verified admin token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentEmployee(pub i64);

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub claims: Map<String, Value>,
    pub exp: usize,
}

/// `yyyy-MM-dd HH:mm`, the timestamp format the back office front end expects.
mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
