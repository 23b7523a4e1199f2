use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_limit() -> u32 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.limit < 1 || self.limit > 50 {
            return Err("limit must be between 1 and 50".to_string());
        }
        Ok(())
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.limit
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        let params = PaginationParams { page: 1, limit: 20 };
        assert_eq!(params.offset(), 0);
        let params = PaginationParams { page: 3, limit: 20 };
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn limit_bounds_are_enforced() {
        assert!(PaginationParams { page: 1, limit: 0 }.validate().is_err());
        assert!(PaginationParams { page: 1, limit: 51 }.validate().is_err());
        assert!(PaginationParams { page: 1, limit: 50 }.validate().is_ok());
        assert!(PaginationParams { page: 0, limit: 20 }.validate().is_err());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 20, 41).pages, 3);
        assert_eq!(PaginationMeta::new(1, 20, 40).pages, 2);
        assert_eq!(PaginationMeta::new(1, 20, 0).pages, 0);
    }
}
