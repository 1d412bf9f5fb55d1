//! Domain Services
//!
//! Pure attendance logic: calendar days, QR ids and QR validity.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc};

use crate::domain::entities::{AttendanceRecord, QrSession};
use crate::domain::value_objects::{AttendanceDate, SubjectName};
use crate::error::{AttendanceError, AttendanceResult};

/// Length of the random suffix of a QR id
pub const QR_RANDOM_SUFFIX_LEN: usize = 8;

/// IST, the zone the attendance day is counted in unless configured otherwise
const DEFAULT_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// The single source of truth for "which calendar day is it"
///
/// Marking and the daily sweep both go through the same policy so a scan
/// and the sweep can never disagree about the date of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarPolicy {
    offset: FixedOffset,
}

impl CalendarPolicy {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Parse `+HH:MM` / `-HH:MM` (also `Z` / `UTC`)
    pub fn parse_offset(value: &str) -> Option<FixedOffset> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
            return Some(Utc.fix());
        }

        let (sign, rest) = match value.as_bytes().first()? {
            b'+' => (1, &value[1..]),
            b'-' => (-1, &value[1..]),
            _ => return None,
        };
        let (hours, minutes) = rest.split_once(':')?;
        let hours: i32 = hours.parse().ok()?;
        let minutes: i32 = minutes.parse().ok()?;
        if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
            return None;
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day containing `now` in the reference zone
    pub fn today(&self, now: DateTime<Utc>) -> AttendanceDate {
        AttendanceDate::new(now.with_timezone(&self.offset).date_naive())
    }

    /// First instant strictly after `now` whose local wall-clock time is `at`
    pub fn next_occurrence(&self, now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
        let local_today = now.with_timezone(&self.offset).date_naive();
        let offset = Duration::seconds(i64::from(self.offset.local_minus_utc()));

        let candidate = Utc.from_utc_datetime(&(local_today.and_time(at) - offset));
        if candidate > now {
            candidate
        } else {
            candidate + Duration::days(1)
        }
    }
}

impl Default for CalendarPolicy {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_OFFSET_SECS).unwrap_or(Utc.fix()),
        }
    }
}

/// `"<subject>-<unix millis>-<8 alphanumerics>"`
pub fn generate_qr_id(subject: &SubjectName, now: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}",
        subject,
        now.timestamp_millis(),
        platform::crypto::random_alphanumeric(QR_RANDOM_SUFFIX_LEN)
    )
}

/// Check a looked-up QR session against the subject the student presented
///
/// Unknown id or subject mismatch is `InvalidQr`; past `expires_at` is
/// `ExpiredQr`.
pub fn validate_qr_session(
    session: Option<QrSession>,
    presented_subject: &SubjectName,
    now: DateTime<Utc>,
) -> AttendanceResult<QrSession> {
    let session = session.ok_or(AttendanceError::InvalidQr)?;

    if &session.subject != presented_subject {
        return Err(AttendanceError::InvalidQr);
    }

    if session.is_expired_at(now) {
        return Err(AttendanceError::ExpiredQr);
    }

    Ok(session)
}

/// Sum of score deltas
pub fn total_score(records: &[AttendanceRecord]) -> i64 {
    records.iter().map(|r| i64::from(r.score_change)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kernel::id::TeacherId;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn session(subject: &str, expires_at: DateTime<Utc>) -> QrSession {
        QrSession {
            qr_id: format!("{}-1-abcdefgh", subject),
            subject: SubjectName::new(subject).unwrap(),
            teacher_id: TeacherId::new(),
            created_at: expires_at - Duration::minutes(5),
            expires_at,
        }
    }

    #[test]
    fn test_today_uses_offset() {
        let policy = CalendarPolicy::default();
        // 19:00 UTC is 00:30 the next day at +05:30
        let now = utc(2026, 3, 7, 19, 0);
        assert_eq!(
            policy.today(now).as_naive(),
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()
        );
        assert_eq!(
            CalendarPolicy::utc().today(now).as_naive(),
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
        );
    }

    #[test]
    fn test_next_occurrence() {
        let policy = CalendarPolicy::default();
        let at = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

        // 10:00 local on the 7th -> 23:59 local on the 7th = 18:29 UTC
        let now = utc(2026, 3, 7, 4, 30);
        assert_eq!(policy.next_occurrence(now, at), utc(2026, 3, 7, 18, 29));

        // Exactly at the trigger -> next day
        let now = utc(2026, 3, 7, 18, 29);
        assert_eq!(policy.next_occurrence(now, at), utc(2026, 3, 8, 18, 29));
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(
            CalendarPolicy::parse_offset("+05:30").map(|o| o.local_minus_utc()),
            Some(19800)
        );
        assert_eq!(
            CalendarPolicy::parse_offset("-04:00").map(|o| o.local_minus_utc()),
            Some(-14400)
        );
        assert_eq!(
            CalendarPolicy::parse_offset("Z").map(|o| o.local_minus_utc()),
            Some(0)
        );
        assert!(CalendarPolicy::parse_offset("05:30").is_none());
        assert!(CalendarPolicy::parse_offset("+25:00").is_none());
        assert!(CalendarPolicy::parse_offset("").is_none());
    }

    #[test]
    fn test_qr_id_format() {
        let subject = SubjectName::new("Math").unwrap();
        let now = utc(2026, 3, 7, 4, 30);
        let qr_id = generate_qr_id(&subject, now);

        let prefix = format!("Math-{}-", now.timestamp_millis());
        assert!(qr_id.starts_with(&prefix));
        let suffix = &qr_id[prefix.len()..];
        assert_eq!(suffix.len(), QR_RANDOM_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_qr_validity_boundary() {
        let expires_at = utc(2026, 3, 7, 4, 35);
        let math = SubjectName::new("Math").unwrap();

        let ok = validate_qr_session(
            Some(session("Math", expires_at)),
            &math,
            expires_at - Duration::milliseconds(1),
        );
        assert!(ok.is_ok());

        let at_expiry = validate_qr_session(Some(session("Math", expires_at)), &math, expires_at);
        assert!(at_expiry.is_ok());

        let expired = validate_qr_session(
            Some(session("Math", expires_at)),
            &math,
            expires_at + Duration::milliseconds(1),
        );
        assert!(matches!(expired, Err(AttendanceError::ExpiredQr)));
    }

    #[test]
    fn test_qr_unknown_or_wrong_subject_is_invalid() {
        let expires_at = utc(2026, 3, 7, 4, 35);
        let math = SubjectName::new("Math").unwrap();
        let now = expires_at - Duration::minutes(1);

        assert!(matches!(
            validate_qr_session(None, &math, now),
            Err(AttendanceError::InvalidQr)
        ));
        assert!(matches!(
            validate_qr_session(Some(session("Physics", expires_at)), &math, now),
            Err(AttendanceError::InvalidQr)
        ));
    }
}
