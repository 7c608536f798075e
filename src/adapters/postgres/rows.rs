//! Row mapping shared by the PostgreSQL repositories.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};

use crate::domain::access::Role;
use crate::domain::attendance::{AttendanceStatus, SessionAttendance};
use crate::domain::calendar::CalendarToken;
use crate::domain::foundation::{
    AttendanceId, DomainError, GroupId, SessionId, Timestamp, UserId,
};
use crate::domain::group::{Category, Group};
use crate::domain::session::{MentoringSession, SessionDetails};
use crate::domain::user::User;

pub(super) const USER_COLUMNS: &str =
    "id, role, email, first_name, last_name, upi, mentee_group_id, calendar_token";

pub(super) const GROUP_COLUMNS: &str =
    "id, group_number, category, mentor_id, info, created_at, updated_at";

pub(super) const SESSION_COLUMNS: &str = "id, title, description, date, start_time, end_time, \
     location, is_public, category, max_capacity, mentor_id, group_id, created_at, updated_at";

pub(super) const ATTENDANCE_COLUMNS: &str =
    "id, session_id, user_id, status, created_at, updated_at";

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    column::<DateTime<Utc>>(row, name).map(Timestamp::from_datetime)
}

fn user_id(row: &PgRow, name: &str) -> Result<UserId, DomainError> {
    let raw: String = column(row, name)?;
    UserId::new(raw).map_err(|e| DomainError::database(&format!("Invalid {}", name), e))
}

pub(super) fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let role: String = column(row, "role")?;
    let role: Role = role
        .parse()
        .map_err(|e| DomainError::database("Invalid role", e))?;
    let mentee_group_id: Option<uuid::Uuid> = column(row, "mentee_group_id")?;
    let calendar_token: Option<String> = column(row, "calendar_token")?;

    Ok(User::reconstitute(
        user_id(row, "id")?,
        role,
        column(row, "email")?,
        column(row, "first_name")?,
        column(row, "last_name")?,
        column(row, "upi")?,
        mentee_group_id.map(GroupId::from_uuid),
        calendar_token.map(CalendarToken::from_stored),
    ))
}

pub(super) fn row_to_group(row: &PgRow) -> Result<Group, DomainError> {
    let number: i32 = column(row, "group_number")?;
    let category: String = column(row, "category")?;
    let category: Category = category
        .parse()
        .map_err(|e| DomainError::database("Invalid category", e))?;
    let mentor_id: Option<String> = column(row, "mentor_id")?;
    let mentor_id = mentor_id
        .map(UserId::new)
        .transpose()
        .map_err(|e| DomainError::database("Invalid mentor_id", e))?;

    Ok(Group::reconstitute(
        GroupId::from_uuid(column(row, "id")?),
        number as u32,
        category,
        mentor_id,
        column(row, "info")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

pub(super) fn row_to_session(row: &PgRow) -> Result<MentoringSession, DomainError> {
    let category: String = column(row, "category")?;
    let category: Category = category
        .parse()
        .map_err(|e| DomainError::database("Invalid category", e))?;
    let start_time: Option<DateTime<Utc>> = column(row, "start_time")?;
    let end_time: Option<DateTime<Utc>> = column(row, "end_time")?;
    let max_capacity: Option<i32> = column(row, "max_capacity")?;

    let details = SessionDetails {
        title: column(row, "title")?,
        description: column(row, "description")?,
        date: timestamp(row, "date")?,
        start_time: start_time.map(Timestamp::from_datetime),
        end_time: end_time.map(Timestamp::from_datetime),
        location: column(row, "location")?,
        is_public: column(row, "is_public")?,
        max_capacity: max_capacity.map(|c| c as u32),
    };

    Ok(MentoringSession::reconstitute(
        SessionId::from_uuid(column(row, "id")?),
        details,
        category,
        user_id(row, "mentor_id")?,
        GroupId::from_uuid(column(row, "group_id")?),
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

/// Maps an attendance whose columns carry `prefix` (empty for plain selects).
pub(super) fn row_to_attendance(row: &PgRow, prefix: &str) -> Result<SessionAttendance, DomainError> {
    let name = |col: &str| format!("{}{}", prefix, col);
    let status: String = column(row, &name("status"))?;
    let status: AttendanceStatus = status
        .parse()
        .map_err(|e| DomainError::database("Invalid attendance status", e))?;

    Ok(SessionAttendance::reconstitute(
        AttendanceId::from_uuid(column(row, &name("id"))?),
        SessionId::from_uuid(column(row, &name("session_id"))?),
        user_id(row, &name("user_id"))?,
        status,
        timestamp(row, &name("created_at"))?,
        timestamp(row, &name("updated_at"))?,
    ))
}
