use std::sync::Arc;

use crate::domain::Activity;
use crate::error::DomainError;
use crate::ports::ActivityRepository;

/// Read-only view over the per-user audit trail.
pub struct ActivityService {
    activities: Arc<dyn ActivityRepository>,
}

impl ActivityService {
    pub fn new(activities: Arc<dyn ActivityRepository>) -> Self {
        Self { activities }
    }

    /// The caller's own activity rows, newest first.
    pub async fn list_mine(&self, user_id: i64) -> Result<Vec<Activity>, DomainError> {
        Ok(self.activities.list_by_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityAction, NewActivity};
    use crate::service::fakes::MemoryActivities;

    fn record(user_id: i64, description: &str) -> NewActivity {
        NewActivity {
            user_id,
            action: ActivityAction::PostCreate,
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn list_mine_is_scoped_to_the_caller() {
        let activities = Arc::new(MemoryActivities::new());
        activities.record(record(1, "mine")).await.unwrap();
        activities.record(record(2, "theirs")).await.unwrap();
        let service = ActivityService::new(activities);

        let mine = service.list_mine(1).await.unwrap();

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].description, "mine");
    }

    #[tokio::test]
    async fn list_mine_is_newest_first() {
        let activities = Arc::new(MemoryActivities::new());
        activities.record(record(1, "first")).await.unwrap();
        activities.record(record(1, "second")).await.unwrap();
        let service = ActivityService::new(activities);

        let mine = service.list_mine(1).await.unwrap();

        assert_eq!(mine[0].description, "second");
        assert_eq!(mine[1].description, "first");
    }
}
