use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    Balance,
}

/// Workout template. Immutable once created.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories: i32,
    pub difficulty: Difficulty,
    pub workout_type: WorkoutType,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i64,
    pub workout_id: i64,
    pub order_index: i32,
    pub name: String,
    pub reps: Option<i32>,
    pub sets: Option<i32>,
    pub duration_seconds: Option<i32>,
}

/// A workout scheduled for a user on a given day. Transitions once,
/// irreversibly, from scheduled to completed.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserWorkout {
    pub id: i64,
    pub user_id: i64,
    pub workout_id: i64,
    pub scheduled_for: DateTime<Utc>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}
