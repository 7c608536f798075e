//! Shared fixtures for handler tests.
//!
//! `World::new` seeds group 1 with mentor `m` and mentees `a`, `b`, plus
//! group-less students `c`, `d` and an admin `admin`.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::domain::access::Role;
use crate::domain::foundation::{AuthenticatedUser, GroupId, SessionId, Timestamp, UserId};
use crate::domain::group::{Category, Group};
use crate::domain::session::{MentoringSession, SessionDetails};
use crate::domain::user::User;
use crate::ports::{GroupRepository, SessionRepository, UserRepository};

pub(crate) fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

pub(crate) fn caller(id: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser::new(uid(id), format!("{}@uni.test", id), None, role)
}

pub(crate) fn details(title: &str, is_public: bool, max_capacity: Option<u32>) -> SessionDetails {
    SessionDetails {
        title: title.to_string(),
        description: Some("Weekly catch-up".to_string()),
        date: Timestamp::now().plus_days(3),
        start_time: None,
        end_time: None,
        location: "Room 401".to_string(),
        is_public,
        max_capacity,
    }
}

pub(crate) struct World {
    pub store: Arc<InMemoryStore>,
    pub group: Group,
}

impl World {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let people = [
            ("m", Role::Mentor, "Maya", "Mentor"),
            ("a", Role::Student, "Alex", "Able"),
            ("b", Role::Student, "Bo", "Baker"),
            ("c", Role::Student, "Cy", "Cole"),
            ("d", Role::Student, "Di", "Dunn"),
            ("admin", Role::Admin, "Ada", "Admin"),
        ];
        for (id, role, first, last) in people {
            let user = User::new(uid(id), role, format!("{}@uni.test", id)).with_name(first, last);
            UserRepository::save(&*store, &user).await.unwrap();
        }

        let mut group = store.create_next(GroupId::new()).await.unwrap();
        group
            .reassign(Some(uid("m")), Category::CsBscMeng, None)
            .unwrap();
        store
            .update_with_mentees(&group, &[uid("a"), uid("b")])
            .await
            .unwrap();

        Self { store, group }
    }

    /// A session owned by `m` in the seeded group, mentees enrolled.
    pub async fn session(&self, is_public: bool, max_capacity: Option<u32>) -> MentoringSession {
        let session = MentoringSession::new(
            SessionId::new(),
            uid("m"),
            &self.group,
            details("Seeded", is_public, max_capacity),
        )
        .unwrap();
        self.store.create_with_enrollment(&session).await.unwrap();
        session
    }
}
