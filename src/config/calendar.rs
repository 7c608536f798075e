//! Calendar feed configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Calendar feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// `PRODID` written into every feed
    #[serde(default = "default_product_id")]
    pub product_id: String,

    /// `X-WR-CALNAME` shown by subscribing clients
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// Dashboard link added to event descriptions
    #[serde(default)]
    pub dashboard_url: Option<String>,

    /// Event length when a session has no end time
    #[serde(default = "default_event_minutes")]
    pub default_event_minutes: i64,
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_id.is_empty() {
            return Err(ValidationError::MissingRequired("CALENDAR__PRODUCT_ID"));
        }
        if self.default_event_minutes <= 0 || self.default_event_minutes > 24 * 60 {
            return Err(ValidationError::InvalidEventLength);
        }
        if let Some(url) = &self.dashboard_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidDashboardUrl);
            }
        }
        Ok(())
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            product_id: default_product_id(),
            calendar_name: default_calendar_name(),
            dashboard_url: None,
            default_event_minutes: default_event_minutes(),
        }
    }
}

fn default_product_id() -> String {
    "-//MentorHub//Sessions//EN".to_string()
}

fn default_calendar_name() -> String {
    "MentorHub Sessions".to_string()
}

fn default_event_minutes() -> i64 {
    60
}
