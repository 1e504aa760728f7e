//! Offset/limit pagination shared by every list endpoint

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 10;

/// List query parameters
#[derive(Debug, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of rows to skip (default: 0)
    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: Option<i64>,
    /// Maximum number of rows to return (default: 10)
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(DEFAULT_SKIP)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}
