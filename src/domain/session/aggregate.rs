//! Mentoring session aggregate.
//!
//! A session is owned by exactly one mentor and one group. Its category is
//! never supplied by callers: it is copied from the owning group whenever the
//! session is created or edited.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Authorizable, DomainError, GroupId, OwnedByUser, SessionId, Timestamp, UserId,
};
use crate::domain::group::{Category, Group};

/// Maximum length for session title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Caller-editable fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetails {
    pub title: String,
    pub description: Option<String>,
    pub date: Timestamp,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: String,
    pub is_public: bool,
    /// Extra slots for attendees from outside the owning group.
    pub max_capacity: Option<u32>,
}

/// Mentoring session.
///
/// # Invariants
///
/// - `title` is 1-500 characters
/// - `end_time` is not before `start_time` when both are set
/// - `max_capacity` is never `Some(0)`; zero means "no limit"
/// - `category` equals the owning group's category as of the last write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentoringSession {
    id: SessionId,
    title: String,
    description: Option<String>,
    date: Timestamp,
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    location: String,
    is_public: bool,
    category: Category,
    max_capacity: Option<u32>,
    mentor_id: UserId,
    group_id: GroupId,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl MentoringSession {
    /// Creates a session owned by `mentor_id` within `group`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the details are invalid
    pub fn new(
        id: SessionId,
        mentor_id: UserId,
        group: &Group,
        details: SessionDetails,
    ) -> Result<Self, DomainError> {
        let details = Self::validate(details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            title: details.title,
            description: details.description,
            date: details.date,
            start_time: details.start_time,
            end_time: details.end_time,
            location: details.location,
            is_public: details.is_public,
            category: group.category(),
            max_capacity: details.max_capacity,
            mentor_id,
            group_id: *group.id(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        details: SessionDetails,
        category: Category,
        mentor_id: UserId,
        group_id: GroupId,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title: details.title,
            description: details.description,
            date: details.date,
            start_time: details.start_time,
            end_time: details.end_time,
            location: details.location,
            is_public: details.is_public,
            category,
            max_capacity: details.max_capacity,
            mentor_id,
            group_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date(&self) -> &Timestamp {
        &self.date
    }

    pub fn start_time(&self) -> Option<&Timestamp> {
        self.start_time.as_ref()
    }

    pub fn end_time(&self) -> Option<&Timestamp> {
        self.end_time.as_ref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn max_capacity(&self) -> Option<u32> {
        self.max_capacity
    }

    pub fn mentor_id(&self) -> &UserId {
        &self.mentor_id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// When the session begins: the start time, else the date.
    pub fn starts_at(&self) -> Timestamp {
        self.start_time.unwrap_or(self.date)
    }

    /// When the session ends: the end time, else `default_minutes` after start.
    pub fn ends_at(&self, default_minutes: i64) -> Timestamp {
        self.end_time
            .unwrap_or_else(|| self.starts_at().plus_minutes(default_minutes))
    }

    /// Returns the editable fields as a value.
    pub fn details(&self) -> SessionDetails {
        SessionDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location.clone(),
            is_public: self.is_public,
            max_capacity: self.max_capacity,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the editable fields and re-inherits the group's category.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the details are invalid
    pub fn update(&mut self, details: SessionDetails, group: &Group) -> Result<(), DomainError> {
        let details = Self::validate(details)?;
        self.title = details.title;
        self.description = details.description;
        self.date = details.date;
        self.start_time = details.start_time;
        self.end_time = details.end_time;
        self.location = details.location;
        self.is_public = details.is_public;
        self.max_capacity = details.max_capacity;
        self.category = group.category();
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate(mut details: SessionDetails) -> Result<SessionDetails, DomainError> {
        let title = details.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title cannot exceed {} characters", MAX_TITLE_LENGTH),
            ));
        }
        details.title = title.to_string();

        if let (Some(start), Some(end)) = (&details.start_time, &details.end_time) {
            if end.is_before(start) {
                return Err(DomainError::validation(
                    "end_time",
                    "End time cannot be before start time",
                ));
            }
        }

        details.description = details.description.filter(|d| !d.trim().is_empty());
        details.max_capacity = details.max_capacity.filter(|&n| n > 0);
        Ok(details)
    }
}

impl OwnedByUser for MentoringSession {
    fn owner_id(&self) -> &UserId {
        &self.mentor_id
    }
}

impl Authorizable for MentoringSession {
    const RESOURCE_TYPE: &'static str = "Session";

    fn resource_id(&self) -> String {
        self.id.to_string()
    }
}
