//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Optional `?emails=a@x.com,b@y.com` filter.
#[derive(Debug, Default, Deserialize)]
pub struct EmailFilterParams {
    pub emails: Option<String>,
}

impl EmailFilterParams {
    /// Split the comma-separated list, dropping blanks. Empty when absent.
    pub fn emails(&self) -> Vec<String> {
        self.emails
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
