//! Activity data port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{Activity, ActivityId, AuthToken, Location};
use crate::domain::errors::ApiError;

/// Body sent when creating or updating an activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub location: Location,
    pub images: Vec<String>,
    pub category: String,
    pub target_money: u64,
}

/// Port for activity CRUD against the backend.
#[async_trait]
pub trait ActivityPort: Send + Sync {
    /// Lists all activities.
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError>;

    /// Fetches one activity.
    async fn get_activity(&self, id: &ActivityId) -> Result<Activity, ApiError>;

    /// Creates an activity.
    async fn create_activity(&self, token: &AuthToken, draft: &ActivityDraft)
    -> Result<(), ApiError>;

    /// Replaces an activity.
    async fn update_activity(
        &self,
        token: &AuthToken,
        id: &ActivityId,
        draft: &ActivityDraft,
    ) -> Result<(), ApiError>;

    /// Deletes an activity.
    async fn delete_activity(&self, token: &AuthToken, id: &ActivityId) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Recording activity port.
    #[derive(Default)]
    pub struct MockActivityPort {
        pub activities: Vec<Activity>,
        pub fail_with: Option<(u16, Option<String>)>,
        pub sent: Mutex<Vec<(String, ActivityDraft)>>,
        pub deleted: Mutex<Vec<ActivityId>>,
    }

    impl MockActivityPort {
        /// Creates a port whose mutations all fail with the given status.
        pub fn failing(status: u16, message: Option<&str>) -> Self {
            Self {
                fail_with: Some((status, message.map(str::to_string))),
                ..Self::default()
            }
        }

        /// Number of mutating calls that reached the port.
        pub fn call_count(&self) -> usize {
            self.sent.lock().unwrap().len() + self.deleted.lock().unwrap().len()
        }

        fn outcome(&self) -> Result<(), ApiError> {
            match &self.fail_with {
                Some((status, message)) => Err(ApiError::from_status(*status, message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ActivityPort for MockActivityPort {
        async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
            Ok(self.activities.clone())
        }

        async fn get_activity(&self, id: &ActivityId) -> Result<Activity, ApiError> {
            self.activities
                .iter()
                .find(|a| &a.id == id)
                .cloned()
                .ok_or_else(|| ApiError::from_status(404, None))
        }

        async fn create_activity(
            &self,
            _token: &AuthToken,
            draft: &ActivityDraft,
        ) -> Result<(), ApiError> {
            self.sent
                .lock()
                .unwrap()
                .push(("POST".to_string(), draft.clone()));
            self.outcome()
        }

        async fn update_activity(
            &self,
            _token: &AuthToken,
            id: &ActivityId,
            draft: &ActivityDraft,
        ) -> Result<(), ApiError> {
            self.sent
                .lock()
                .unwrap()
                .push((format!("PUT {id}"), draft.clone()));
            self.outcome()
        }

        async fn delete_activity(
            &self,
            _token: &AuthToken,
            id: &ActivityId,
        ) -> Result<(), ApiError> {
            self.deleted.lock().unwrap().push(id.clone());
            self.outcome()
        }
    }
}
