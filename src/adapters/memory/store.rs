//! In-memory implementation of the persistence ports.
//!
//! One `InMemoryStore` implements `UserRepository`, `GroupRepository`,
//! `SessionRepository` and `AttendanceRepository` over a single state guarded
//! by one `RwLock`. Every compound operation (auto-enrollment, capacity-checked
//! join, mentee replacement, cascade delete) runs under one write guard, which
//! gives it the same atomicity the PostgreSQL adapter gets from transactions.
//!
//! Used by tests and by the binary when `database.url` is `memory://`.
//! Does not persist data across restarts.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::attendance::{AttendanceStatus, SessionAttendance};
use crate::domain::calendar::CalendarToken;
use crate::domain::foundation::{DomainError, ErrorCode, GroupId, SessionId, Timestamp, UserId};
use crate::domain::group::{check_mentee_assignment, check_mentor_assignment, Group};
use crate::domain::session::{ExtraCapacity, MentoringSession};
use crate::domain::user::User;
use crate::ports::{
    AttendanceRepository, AttendanceSummary, GroupRepository, SessionRepository, UserRepository,
    VisibleSessions,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    groups: HashMap<GroupId, Group>,
    sessions: HashMap<SessionId, MentoringSession>,
    attendances: HashMap<(SessionId, UserId), SessionAttendance>,
}

impl State {
    fn mentee_group_of(&self, user_id: &UserId) -> Option<GroupId> {
        self.users.get(user_id).and_then(User::mentee_group_id)
    }

    fn require_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.users.contains_key(user_id) {
            Ok(())
        } else {
            Err(user_not_found(user_id))
        }
    }
}

/// Shared in-memory backing store.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored attendances across all sessions.
    pub async fn attendance_count(&self) -> usize {
        self.state.read().await.attendances.len()
    }
}

fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        .with_detail("user_id", id.as_str())
}

fn group_not_found(id: &GroupId) -> DomainError {
    DomainError::new(ErrorCode::GroupNotFound, format!("Group not found: {}", id))
        .with_detail("group_id", id.to_string())
}

fn session_not_found(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("session_id", id.to_string())
}

fn sorted_by_date(mut sessions: Vec<MentoringSession>) -> Vec<MentoringSession> {
    sessions.sort_by(|a, b| {
        a.date()
            .cmp(b.date())
            .then_with(|| a.created_at().cmp(b.created_at()))
    });
    sessions
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .users
            .insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn insert_if_absent(&self, user: &User) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        let stored = state
            .users
            .entry(user.id().clone())
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn ensure_calendar_token(
        &self,
        id: &UserId,
        candidate: &CalendarToken,
    ) -> Result<CalendarToken, DomainError> {
        let mut state = self.state.write().await;
        let user = state.users.get_mut(id).ok_or_else(|| user_not_found(id))?;
        if let Some(existing) = user.calendar_token() {
            return Ok(existing.clone());
        }
        user.set_calendar_token(candidate.clone());
        Ok(candidate.clone())
    }

    async fn replace_calendar_token(
        &self,
        id: &UserId,
        token: &CalendarToken,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let user = state.users.get_mut(id).ok_or_else(|| user_not_found(id))?;
        user.set_calendar_token(token.clone());
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Groups
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn create_next(&self, id: GroupId) -> Result<Group, DomainError> {
        let mut state = self.state.write().await;
        let highest = state.groups.values().map(Group::group_number).max();
        let group = Group::new(id, Group::next_number(highest));
        state.groups.insert(id, group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        Ok(self.state.read().await.groups.get(id).cloned())
    }

    async fn find_by_mentor(&self, mentor_id: &UserId) -> Result<Option<Group>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .groups
            .values()
            .find(|g| g.mentor_id() == Some(mentor_id))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, DomainError> {
        let mut groups: Vec<Group> = self.state.read().await.groups.values().cloned().collect();
        groups.sort_by_key(Group::group_number);
        Ok(groups)
    }

    async fn list_mentees(&self, id: &GroupId) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        let mut mentees: Vec<User> = state
            .users
            .values()
            .filter(|u| u.mentee_group_id() == Some(*id))
            .cloned()
            .collect();
        mentees.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(mentees)
    }

    async fn update_with_mentees(
        &self,
        group: &Group,
        mentee_ids: &[UserId],
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let target = *group.id();
        if !state.groups.contains_key(&target) {
            return Err(group_not_found(&target));
        }

        if let Some(mentor_id) = group.mentor_id() {
            state.require_user(mentor_id)?;
            let mentoring = state
                .groups
                .values()
                .find(|g| g.mentor_id() == Some(mentor_id) && g.id() != &target)
                .map(|g| *g.id());
            check_mentor_assignment(&target, mentor_id, mentoring)?;
        }

        let mut seen = HashSet::new();
        let requested: Vec<&UserId> = mentee_ids.iter().filter(|id| seen.insert(*id)).collect();
        for id in &requested {
            state.require_user(id)?;
        }
        check_mentee_assignment(
            &target,
            requested.iter().map(|id| (*id, state.mentee_group_of(id))),
        )?;

        let keep: HashSet<&UserId> = requested.iter().copied().collect();
        for user in state.users.values_mut() {
            if keep.contains(user.id()) {
                user.set_mentee_group(Some(target));
            } else if user.mentee_group_id() == Some(target) {
                user.set_mentee_group(None);
            }
        }
        state.groups.insert(target, group.clone());
        Ok(())
    }

    async fn delete(&self, id: &GroupId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.groups.remove(id).is_none() {
            return Err(group_not_found(id));
        }
        for user in state.users.values_mut() {
            if user.mentee_group_id() == Some(*id) {
                user.set_mentee_group(None);
            }
        }
        let doomed: HashSet<SessionId> = state
            .sessions
            .values()
            .filter(|s| s.group_id() == id)
            .map(|s| *s.id())
            .collect();
        state.sessions.retain(|sid, _| !doomed.contains(sid));
        state.attendances.retain(|(sid, _), _| !doomed.contains(sid));
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create_with_enrollment(
        &self,
        session: &MentoringSession,
    ) -> Result<Vec<SessionAttendance>, DomainError> {
        let mut state = self.state.write().await;
        if !state.groups.contains_key(session.group_id()) {
            return Err(group_not_found(session.group_id()));
        }

        let mut mentees: Vec<UserId> = state
            .users
            .values()
            .filter(|u| u.mentee_group_id().as_ref() == Some(session.group_id()))
            .map(|u| u.id().clone())
            .collect();
        mentees.sort();

        let enrolled: Vec<SessionAttendance> = mentees
            .into_iter()
            .map(|user_id| SessionAttendance::register(*session.id(), user_id))
            .collect();

        state.sessions.insert(*session.id(), session.clone());
        for attendance in &enrolled {
            state.attendances.insert(
                (*attendance.session_id(), attendance.user_id().clone()),
                attendance.clone(),
            );
        }
        Ok(enrolled)
    }

    async fn update(&self, session: &MentoringSession) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(session.id()) {
            Some(existing) => {
                *existing = session.clone();
                Ok(())
            }
            None => Err(session_not_found(session.id())),
        }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentoringSession>, DomainError> {
        Ok(self.state.read().await.sessions.get(id).cloned())
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<MentoringSession>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_date(
            state
                .sessions
                .values()
                .filter(|s| s.mentor_id() == mentor_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_visible(
        &self,
        filter: &VisibleSessions,
    ) -> Result<Vec<MentoringSession>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_date(
            state
                .sessions
                .values()
                .filter(|s| {
                    s.is_public()
                        || filter.group_id.as_ref() == Some(s.group_id())
                        || filter.mentor_id.as_ref() == Some(s.mentor_id())
                })
                .cloned()
                .collect(),
        ))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.sessions.remove(id).is_none() {
            return Err(session_not_found(id));
        }
        state.attendances.retain(|(sid, _), _| sid != id);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Attendance
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn register(
        &self,
        attendance: &SessionAttendance,
        capacity: Option<ExtraCapacity>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let session_id = *attendance.session_id();
        if !state.sessions.contains_key(&session_id) {
            return Err(session_not_found(&session_id));
        }

        let key = (session_id, attendance.user_id().clone());
        if state.attendances.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::AlreadyRegistered,
                "Already registered for this session",
            ));
        }

        if let Some(capacity) = capacity {
            let extra = state
                .attendances
                .values()
                .filter(|a| a.session_id() == &session_id)
                .filter(|a| capacity.counts_as_extra(state.mentee_group_of(a.user_id())))
                .count() as u32;
            capacity.admit(extra)?;
        }

        state.attendances.insert(key, attendance.clone());
        Ok(())
    }

    async fn upsert_status(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        status: AttendanceStatus,
    ) -> Result<SessionAttendance, DomainError> {
        let mut state = self.state.write().await;
        if !state.sessions.contains_key(session_id) {
            return Err(session_not_found(session_id));
        }
        state.require_user(user_id)?;

        let attendance = state
            .attendances
            .entry((*session_id, user_id.clone()))
            .and_modify(|a| a.set_status(status))
            .or_insert_with(|| SessionAttendance::new(*session_id, user_id.clone(), status));
        Ok(attendance.clone())
    }

    async fn find(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Option<SessionAttendance>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .attendances
            .get(&(*session_id, user_id.clone()))
            .cloned())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<SessionAttendance>, DomainError> {
        let state = self.state.read().await;
        let mut list: Vec<SessionAttendance> = state
            .attendances
            .values()
            .filter(|a| a.session_id() == session_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.user_id().cmp(b.user_id()))
        });
        Ok(list)
    }

    async fn count_for_session(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .attendances
            .keys()
            .filter(|(sid, _)| sid == session_id)
            .count() as u32)
    }

    async fn summarize_for_user(
        &self,
        session_ids: &[SessionId],
        user_id: &UserId,
    ) -> Result<HashMap<SessionId, AttendanceSummary>, DomainError> {
        let state = self.state.read().await;
        let mut summaries: HashMap<SessionId, AttendanceSummary> = session_ids
            .iter()
            .map(|id| (*id, AttendanceSummary::default()))
            .collect();
        for ((session_id, attendee), attendance) in &state.attendances {
            if let Some(summary) = summaries.get_mut(session_id) {
                summary.count += 1;
                if attendee == user_id {
                    summary.mine = Some(attendance.clone());
                }
            }
        }
        Ok(summaries)
    }

    async fn list_upcoming_for_user(
        &self,
        user_id: &UserId,
        from: Timestamp,
    ) -> Result<Vec<(SessionAttendance, MentoringSession)>, DomainError> {
        let state = self.state.read().await;
        let mut rows: Vec<(SessionAttendance, MentoringSession)> = state
            .attendances
            .values()
            .filter(|a| a.user_id() == user_id)
            .filter_map(|a| {
                state
                    .sessions
                    .get(a.session_id())
                    .filter(|s| !s.date().is_before(&from))
                    .map(|s| (a.clone(), s.clone()))
            })
            .collect();
        rows.sort_by(|(_, a), (_, b)| a.date().cmp(b.date()));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::Role;
    use crate::domain::group::Category;
    use crate::domain::session::SessionDetails;
    use std::sync::Arc;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn details(is_public: bool, max_capacity: Option<u32>) -> SessionDetails {
        SessionDetails {
            title: "Session".to_string(),
            description: None,
            date: Timestamp::now().plus_days(7),
            start_time: None,
            end_time: None,
            location: "Room 1".to_string(),
            is_public,
            max_capacity,
        }
    }

    /// Group G with mentor M and mentees A, B; students C (group-less) and D.
    async fn seeded() -> (Arc<InMemoryStore>, Group) {
        let store = Arc::new(InMemoryStore::new());
        for (id, role) in [
            ("m", Role::Mentor),
            ("a", Role::Student),
            ("b", Role::Student),
            ("c", Role::Student),
            ("d", Role::Student),
        ] {
            UserRepository::save(&*store, &User::new(uid(id), role, format!("{}@uni.test", id)))
                .await
                .unwrap();
        }
        let mut group = store.create_next(GroupId::new()).await.unwrap();
        group.reassign(Some(uid("m")), Category::CsBscMeng, None).unwrap();
        store
            .update_with_mentees(&group, &[uid("a"), uid("b")])
            .await
            .unwrap();
        (store, group)
    }

    async fn session(store: &InMemoryStore, group: &Group, d: SessionDetails) -> MentoringSession {
        let s = MentoringSession::new(SessionId::new(), uid("m"), group, d).unwrap();
        store.create_with_enrollment(&s).await.unwrap();
        s
    }

    #[tokio::test]
    async fn group_numbers_increment_from_one() {
        let store = InMemoryStore::new();
        let first = store.create_next(GroupId::new()).await.unwrap();
        let second = store.create_next(GroupId::new()).await.unwrap();
        assert_eq!(first.group_number(), 1);
        assert_eq!(second.group_number(), 2);
    }

    #[tokio::test]
    async fn creating_session_enrolls_every_mentee() {
        let (store, group) = seeded().await;
        let s = session(&store, &group, details(false, None)).await;

        let attendances = store.list_for_session(s.id()).await.unwrap();
        let users: Vec<&str> = attendances.iter().map(|a| a.user_id().as_str()).collect();
        assert_eq!(users.len(), 2);
        assert!(users.contains(&"a") && users.contains(&"b"));
        assert!(attendances
            .iter()
            .all(|a| a.status() == AttendanceStatus::Registered));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let (store, group) = seeded().await;
        let s = session(&store, &group, details(true, None)).await;

        let err = store
            .register(&SessionAttendance::register(*s.id(), uid("a")), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyRegistered);
    }

    #[tokio::test]
    async fn extra_capacity_counts_only_outsiders() {
        let (store, group) = seeded().await;
        let s = session(&store, &group, details(true, Some(1))).await;
        let cap = ExtraCapacity::new(*group.id(), 1);

        store
            .register(&SessionAttendance::register(*s.id(), uid("c")), Some(cap))
            .await
            .unwrap();
        let err = store
            .register(&SessionAttendance::register(*s.id(), uid("d")), Some(cap))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CapacityExceeded);
        assert_eq!(store.count_for_session(s.id()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn concurrent_joins_never_exceed_capacity() {
        let (store, group) = seeded().await;
        let s = session(&store, &group, details(true, Some(3))).await;
        let cap = ExtraCapacity::new(*group.id(), 3);

        let mut handles = Vec::new();
        for i in 0..20 {
            let id = uid(&format!("joiner-{}", i));
            UserRepository::save(&*store, &User::new(id.clone(), Role::Student, "j@uni.test"))
                .await
                .unwrap();
            let store = Arc::clone(&store);
            let session_id = *s.id();
            handles.push(tokio::spawn(async move {
                store
                    .register(&SessionAttendance::register(session_id, id), Some(cap))
                    .await
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 3);
    }

    #[tokio::test]
    async fn mentee_replacement_rejects_member_of_other_group() {
        let (store, _group) = seeded().await;
        let other = store.create_next(GroupId::new()).await.unwrap();

        let err = store
            .update_with_mentees(&other, &[uid("a")])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenteeAlreadyAssigned);
        assert!(store.list_mentees(other.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mentee_replacement_drops_unlisted_members() {
        let (store, group) = seeded().await;
        store
            .update_with_mentees(&group, &[uid("b"), uid("c")])
            .await
            .unwrap();

        let ids: Vec<String> = store
            .list_mentees(group.id())
            .await
            .unwrap()
            .iter()
            .map(|u| u.id().to_string())
            .collect();
        assert_eq!(ids, vec!["b".to_string(), "c".to_string()]);
        let a = UserRepository::find_by_id(&*store, &uid("a")).await.unwrap().unwrap();
        assert_eq!(a.mentee_group_id(), None);
    }

    #[tokio::test]
    async fn mentor_cannot_run_two_groups() {
        let (store, _group) = seeded().await;
        let mut other = store.create_next(GroupId::new()).await.unwrap();
        other.reassign(Some(uid("m")), Category::CsBscMeng, None).unwrap();

        let err = store.update_with_mentees(&other, &[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MentorAlreadyAssigned);
    }

    #[tokio::test]
    async fn deleting_group_cascades_to_sessions_and_clears_members() {
        let (store, group) = seeded().await;
        let s = session(&store, &group, details(false, None)).await;

        GroupRepository::delete(&*store, group.id()).await.unwrap();

        assert!(SessionRepository::find_by_id(&*store, s.id()).await.unwrap().is_none());
        assert_eq!(store.attendance_count().await, 0);
        let a = UserRepository::find_by_id(&*store, &uid("a")).await.unwrap().unwrap();
        assert_eq!(a.mentee_group_id(), None);
    }

    #[tokio::test]
    async fn upsert_creates_then_overwrites() {
        let (store, group) = seeded().await;
        let s = session(&store, &group, details(false, None)).await;

        let created = store
            .upsert_status(s.id(), &uid("c"), AttendanceStatus::Absent)
            .await
            .unwrap();
        let updated = store
            .upsert_status(s.id(), &uid("c"), AttendanceStatus::Present)
            .await
            .unwrap();

        assert_eq!(created.id(), updated.id());
        assert_eq!(updated.status(), AttendanceStatus::Present);
        assert_eq!(store.count_for_session(s.id()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_existing_account() {
        let (store, group) = seeded().await;
        let token = store
            .ensure_calendar_token(&uid("a"), &CalendarToken::generate())
            .await
            .unwrap();

        let stored = store
            .insert_if_absent(&User::new(uid("a"), Role::Student, "a@uni.test"))
            .await
            .unwrap();

        assert_eq!(stored.calendar_token(), Some(&token));
        assert_eq!(stored.mentee_group_id(), Some(*group.id()));
    }

    #[tokio::test]
    async fn insert_if_absent_stores_new_account() {
        let store = InMemoryStore::new();
        let stored = store
            .insert_if_absent(&User::new(uid("new"), Role::Student, "new@uni.test"))
            .await
            .unwrap();

        assert_eq!(stored.email(), "new@uni.test");
        assert!(UserRepository::find_by_id(&store, &uid("new")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn ensure_token_keeps_first_value() {
        let (store, _) = seeded().await;
        let first = CalendarToken::generate();
        let second = CalendarToken::generate();

        let a = store.ensure_calendar_token(&uid("a"), &first).await.unwrap();
        let b = store.ensure_calendar_token(&uid("a"), &second).await.unwrap();
        assert_eq!(a, first);
        assert_eq!(b, first);
    }

    #[tokio::test]
    async fn summaries_cover_every_requested_session() {
        let (store, group) = seeded().await;
        let enrolled = session(&store, &group, details(false, None)).await;
        let unknown = SessionId::new();

        let summaries = store
            .summarize_for_user(&[*enrolled.id(), unknown], &uid("a"))
            .await
            .unwrap();

        let own = &summaries[enrolled.id()];
        assert_eq!(own.count, 2);
        assert_eq!(own.mine.as_ref().map(|a| a.user_id().as_str()), Some("a"));
        assert_eq!(summaries[&unknown], AttendanceSummary::default());

        let outsider = store
            .summarize_for_user(&[*enrolled.id()], &uid("c"))
            .await
            .unwrap();
        assert_eq!(outsider[enrolled.id()].count, 2);
        assert!(outsider[enrolled.id()].mine.is_none());
    }

    #[tokio::test]
    async fn upcoming_excludes_past_sessions() {
        let (store, group) = seeded().await;
        let future = session(&store, &group, details(false, None)).await;
        let mut past_details = details(false, None);
        past_details.date = Timestamp::now().minus_days(3);
        session(&store, &group, past_details).await;

        let rows = store
            .list_upcoming_for_user(&uid("a"), Timestamp::now())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.id(), future.id());
    }

    #[tokio::test]
    async fn visible_listing_combines_public_group_and_mentor() {
        let (store, group) = seeded().await;
        let private = session(&store, &group, details(false, None)).await;
        let public = session(&store, &group, details(true, None)).await;

        let outsider = store.list_visible(&VisibleSessions::default()).await.unwrap();
        assert_eq!(outsider.len(), 1);
        assert_eq!(outsider[0].id(), public.id());

        let member = store
            .list_visible(&VisibleSessions {
                group_id: Some(*group.id()),
                mentor_id: None,
            })
            .await
            .unwrap();
        assert_eq!(member.len(), 2);
        assert!(member.iter().any(|s| s.id() == private.id()));
    }
}
