//! Application Configuration
//!
//! Configuration for the attendance application layer.

use chrono::{DateTime, NaiveTime, Utc};
use std::time::Duration;

use crate::domain::services::CalendarPolicy;

/// Longest QR session lifetime accepted from configuration
pub const MAX_QR_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Attendance application configuration
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    /// How long a QR session accepts scans
    pub qr_ttl: Duration,
    /// Decides the calendar day for marking and for the sweep
    pub calendar: CalendarPolicy,
    /// Local wall-clock time (in `calendar`'s zone) of the daily sweep
    pub sweep_at: NaiveTime,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            qr_ttl: Duration::from_secs(5 * 60),
            calendar: CalendarPolicy::default(),
            sweep_at: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl AttendanceConfig {
    pub fn development() -> Self {
        Self::default()
    }

    /// Expiry of a session opened at `opened_at`; `None` if it cannot be represented
    pub fn qr_expires_at(&self, opened_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(self.qr_ttl).ok()?;
        opened_at.checked_add_signed(ttl)
    }

    /// Parse a sweep time such as `23:59` or `23:59:30`
    pub fn parse_sweep_at(value: &str) -> Option<NaiveTime> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AttendanceConfig::default();
        assert_eq!(config.qr_ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_at, NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert_eq!(config.calendar.offset().local_minus_utc(), 19_800);
    }

    #[test]
    fn test_qr_expires_at() {
        let opened = DateTime::parse_from_rfc3339("2026-03-07T04:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let config = AttendanceConfig::default();
        assert_eq!(
            config.qr_expires_at(opened),
            Some(opened + chrono::Duration::minutes(5))
        );

        let config = AttendanceConfig {
            qr_ttl: Duration::from_secs(10_000_000_000_000),
            ..AttendanceConfig::default()
        };
        assert!(config.qr_expires_at(opened).is_none());

        let config = AttendanceConfig {
            qr_ttl: Duration::MAX,
            ..AttendanceConfig::default()
        };
        assert!(config.qr_expires_at(opened).is_none());
    }

    #[test]
    fn test_parse_sweep_at() {
        assert_eq!(
            AttendanceConfig::parse_sweep_at("23:59"),
            NaiveTime::from_hms_opt(23, 59, 0)
        );
        assert_eq!(
            AttendanceConfig::parse_sweep_at("06:00:30"),
            NaiveTime::from_hms_opt(6, 0, 30)
        );
        assert!(AttendanceConfig::parse_sweep_at("24:00").is_none());
        assert!(AttendanceConfig::parse_sweep_at("noon").is_none());
    }
}
