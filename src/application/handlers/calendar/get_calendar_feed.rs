//! GetCalendarFeedHandler - Query handler for a user's iCalendar feed.
//!
//! The token in the subscription URL is the only credential. A missing
//! user and a wrong token produce the same `AccessDenied`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::attendance::AttendanceStatus;
use crate::domain::calendar::{CalendarError, CalendarFeed, FeedEvent, Organizer};
use crate::domain::foundation::{GroupId, Timestamp, UserId};
use crate::domain::group::Group;
use crate::domain::user::User;
use crate::ports::{AttendanceRepository, GroupRepository, UserRepository};

/// Static values rendered into every feed.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub product_id: String,
    pub calendar_name: String,
    pub dashboard_url: Option<String>,
    pub default_event_minutes: i64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            product_id: "-//MentorHub//Sessions//EN".to_string(),
            calendar_name: "MentorHub Sessions".to_string(),
            dashboard_url: None,
            default_event_minutes: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetCalendarFeedQuery {
    pub user_id: UserId,
    pub token: Option<String>,
}

pub struct GetCalendarFeedHandler {
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
    attendances: Arc<dyn AttendanceRepository>,
    settings: FeedSettings,
}

impl GetCalendarFeedHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        attendances: Arc<dyn AttendanceRepository>,
        settings: FeedSettings,
    ) -> Self {
        Self {
            users,
            groups,
            attendances,
            settings,
        }
    }

    /// Returns the rendered `text/calendar` body.
    pub async fn handle(&self, query: GetCalendarFeedQuery) -> Result<String, CalendarError> {
        // 1. Token check
        let presented = query.token.as_deref().unwrap_or("");
        let user = self.users.find_by_id(&query.user_id).await?;
        let authorized = user
            .as_ref()
            .and_then(User::calendar_token)
            .map(|stored| stored.matches(presented))
            .unwrap_or(false);
        if !authorized {
            tracing::warn!(user_id = %query.user_id, "Calendar feed access denied");
            return Err(CalendarError::AccessDenied);
        }

        // 2. Upcoming, non-cancelled attendances
        let now = Timestamp::now();
        let upcoming: Vec<_> = self
            .attendances
            .list_upcoming_for_user(&query.user_id, now)
            .await?
            .into_iter()
            .filter(|(attendance, _)| attendance.status() != AttendanceStatus::Cancelled)
            .collect();

        // 3. Organizers and group labels
        let mut mentor_ids: Vec<UserId> = upcoming
            .iter()
            .map(|(_, session)| session.mentor_id().clone())
            .collect();
        mentor_ids.sort();
        mentor_ids.dedup();
        let mentors: HashMap<UserId, User> = self
            .users
            .find_by_ids(&mentor_ids)
            .await?
            .into_iter()
            .map(|u| (u.id().clone(), u))
            .collect();

        let mut groups: HashMap<GroupId, Option<Group>> = HashMap::new();
        for (_, session) in &upcoming {
            if !groups.contains_key(session.group_id()) {
                let group = self.groups.find_by_id(session.group_id()).await?;
                groups.insert(*session.group_id(), group);
            }
        }

        // 4. Render
        let mut feed = CalendarFeed::new(&self.settings.product_id, &self.settings.calendar_name);
        for (attendance, session) in &upcoming {
            let organizer = mentors.get(session.mentor_id()).map(|m| Organizer {
                name: m.full_name(),
                email: m.email().to_string(),
            });
            let label = groups
                .get(session.group_id())
                .and_then(Option::as_ref)
                .map(Group::label)
                .unwrap_or_default();
            feed.push(FeedEvent::for_attendance(
                attendance,
                session,
                label,
                organizer,
                self.settings.dashboard_url.clone(),
                self.settings.default_event_minutes,
            ));
        }

        tracing::debug!(
            user_id = %query.user_id,
            events = feed.events().len(),
            "Calendar feed rendered"
        );

        Ok(feed.render(now))
    }
}
