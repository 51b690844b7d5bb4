use actix_web::{web, HttpResponse};
use chrono::{DateTime, Days, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use crate::errors::AppError;
use crate::models::workout::{UserWorkout, Workout};
use crate::store::Store;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[validate(required(message = "workoutId is required"))]
    workout_id: Option<i64>,

    #[validate(required(message = "scheduledFor is required"))]
    #[validate(length(min = 1, message = "scheduledFor cannot be empty"))]
    scheduled_for: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserWorkoutDetail {
    #[serde(flatten)]
    assignment: UserWorkout,
    workout: Workout,
}

/// Duplicate detection compares the calendar day only, not the full
/// timestamp: two requests for the same workout on the same date are the
/// same assignment no matter the time of day.
fn find_same_day_assignment(
    assignments: &[UserWorkout],
    workout_id: i64,
    scheduled_for: DateTime<Utc>,
) -> Option<&UserWorkout> {
    let target_day = scheduled_for.date_naive();
    assignments
        .iter()
        .find(|uw| uw.workout_id == workout_id && uw.scheduled_for.date_naive() == target_day)
}

/// Consecutive calendar days ending today with at least one completed
/// assignment.
fn current_streak(assignments: &[UserWorkout], today: NaiveDate) -> i32 {
    let completed_days: HashSet<NaiveDate> = assignments
        .iter()
        .filter_map(|uw| uw.completed_at)
        .map(|at| at.date_naive())
        .collect();

    let mut streak = 0;
    let mut day = today;
    while completed_days.contains(&day) {
        streak += 1;
        day = match day.checked_sub_days(Days::new(1)) {
            Some(previous) => previous,
            None => break,
        };
    }
    streak
}

// GET /v1/users/{userId}/workouts
pub async fn list_assignments(
    store: web::Data<Store>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store
        .get_user(*user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(store.list_user_workouts(*user_id)))
}

// POST /v1/users/{userId}/workouts
pub async fn schedule_workout(
    store: web::Data<Store>,
    user_id: web::Path<i64>,
    payload: web::Json<ScheduleRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let user = store
        .get_user(*user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let workout_id = payload.workout_id.unwrap();
    store
        .get_workout(workout_id)
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    let scheduled_for = DateTime::parse_from_rfc3339(payload.scheduled_for.as_ref().unwrap())
        .map_err(|_| AppError::BadRequest("Invalid date format".to_string()))?
        .with_timezone(&Utc);

    // Duplicate guard: scheduling is idempotent per (user, workout, day)
    let assignments = store.list_user_workouts(user.id);
    if let Some(existing) = find_same_day_assignment(&assignments, workout_id, scheduled_for) {
        return Ok(HttpResponse::Ok().json(existing));
    }

    let assignment = store.create_user_workout(user.id, workout_id, scheduled_for);
    info!(
        "scheduled workout {} for user {} on {}",
        workout_id,
        user.id,
        scheduled_for.date_naive()
    );

    Ok(HttpResponse::Created().json(assignment))
}

// POST /v1/user-workouts/{id}/complete
//
// Scheduled -> Completed is the only transition and it is terminal. All
// lookups happen before the first write so a failure leaves no partial
// state behind.
pub async fn complete_workout(
    store: web::Data<Store>,
    assignment_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let mut assignment = store
        .get_user_workout(*assignment_id)
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

    if assignment.completed {
        return Err(AppError::AlreadyCompleted(
            "Workout already completed".to_string(),
        ));
    }

    let workout = store
        .get_workout(assignment.workout_id)
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    let mut user = store
        .get_user(assignment.user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    // Not every user has adopted a pet; that is fine
    let pet = store.get_pet_by_user(user.id);

    let now = Utc::now();
    assignment.completed = true;
    assignment.completed_at = Some(now);
    store.save_user_workout(assignment.clone());

    user.add_stats(i64::from(workout.calories), i64::from(workout.duration_minutes), 1);
    user.streak = current_streak(&store.list_user_workouts(user.id), now.date_naive());
    store.save_user(user.clone());

    if let Some(mut pet) = pet {
        pet.record_workout(workout.calories);
        store.save_pet(pet);
    }

    info!(
        "user {} completed workout {} ({} kcal)",
        user.id, workout.id, workout.calories
    );

    Ok(HttpResponse::Ok().json(UserWorkoutDetail { assignment, workout }))
}
