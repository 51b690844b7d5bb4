use serde::Serialize;
use chrono::{DateTime, Utc};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub calories_burned: i64,
    pub active_minutes: i64,
    pub completed_workouts: i64,
    pub streak: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Adds to the cumulative counters. Deltas are validated non-negative at
    /// the boundary, so the counters never decrease.
    pub fn add_stats(&mut self, calories_burned: i64, active_minutes: i64, completed_workouts: i64) {
        self.calories_burned += calories_burned;
        self.active_minutes += active_minutes;
        self.completed_workouts += completed_workouts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_stats_accumulates() {
        let mut user = User {
            id: 1,
            username: "demo".to_string(),
            calories_burned: 0,
            active_minutes: 0,
            completed_workouts: 0,
            streak: 0,
            created_at: Utc::now(),
        };
        user.add_stats(50, 10, 1);
        user.add_stats(50, 10, 1);
        assert_eq!(user.calories_burned, 100);
        assert_eq!(user.active_minutes, 20);
        assert_eq!(user.completed_workouts, 2);
    }
}
