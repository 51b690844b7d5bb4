use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;
use crate::models::workout::{Difficulty, Exercise, Workout, WorkoutType};
use crate::store::Store;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    #[validate(required(message = "Name is required"))]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    name: Option<String>,

    description: Option<String>,

    #[validate(required(message = "durationMinutes is required"))]
    #[validate(range(min = 1, message = "durationMinutes must be at least 1"))]
    duration_minutes: Option<i32>,

    #[validate(required(message = "calories is required"))]
    #[validate(range(min = 0, message = "calories must be non-negative"))]
    calories: Option<i32>,

    difficulty: Difficulty,
    workout_type: WorkoutType,

    #[serde(default)]
    exercises: Vec<ExerciseRequest>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRequest {
    #[validate(required(message = "Exercise name is required"))]
    #[validate(length(min = 1, message = "Exercise name cannot be empty"))]
    name: Option<String>,

    #[validate(range(min = 1, message = "reps must be at least 1"))]
    reps: Option<i32>,

    #[validate(range(min = 1, message = "sets must be at least 1"))]
    sets: Option<i32>,

    #[validate(range(min = 1, message = "durationSeconds must be at least 1"))]
    duration_seconds: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutDetailResponse {
    #[serde(flatten)]
    workout: Workout,
    exercises: Vec<Exercise>,
}

// GET /v1/workouts
pub async fn list_workouts(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(store.list_workouts()))
}

// GET /v1/workouts/{workoutId}
pub async fn get_workout(
    store: web::Data<Store>,
    workout_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let workout = store
        .get_workout(*workout_id)
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    let exercises = store.exercises_for_workout(workout.id);

    Ok(HttpResponse::Ok().json(WorkoutDetailResponse { workout, exercises }))
}

// POST /v1/workouts
//
// Templates are immutable once created, so there is no update route.
pub async fn create_workout(
    store: web::Data<Store>,
    payload: web::Json<WorkoutRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    for exercise in &payload.exercises {
        validate_payload(exercise)?;
    }

    let workout = store.create_workout(
        payload.name.as_deref().unwrap(),
        payload.description.as_deref().unwrap_or(""),
        payload.duration_minutes.unwrap(),
        payload.calories.unwrap(),
        payload.difficulty,
        payload.workout_type,
    );

    // Ordering keys are assigned from list position, ascending from 1
    let exercises: Vec<Exercise> = payload
        .exercises
        .iter()
        .enumerate()
        .map(|(i, e)| {
            store.create_exercise(
                workout.id,
                i as i32 + 1,
                e.name.as_deref().unwrap(),
                e.reps,
                e.sets,
                e.duration_seconds,
            )
        })
        .collect();

    Ok(HttpResponse::Created().json(WorkoutDetailResponse { workout, exercises }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    macro_rules! test_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data($store.clone())
                    .service(
                        web::resource("/v1/workouts")
                            .route(web::get().to(list_workouts))
                            .route(web::post().to(create_workout)),
                    )
                    .service(
                        web::resource("/v1/workouts/{workoutId}")
                            .route(web::get().to(get_workout)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_assigns_exercise_order_from_position() {
        let store = web::Data::new(Store::new());
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/v1/workouts")
            .set_json(json!({
                "name": "Morning Cardio",
                "description": "Quick start to the day",
                "durationMinutes": 20,
                "calories": 150,
                "difficulty": "beginner",
                "workoutType": "cardio",
                "exercises": [
                    { "name": "Jumping jacks", "durationSeconds": 60 },
                    { "name": "High knees", "durationSeconds": 45 }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let exercises = store.exercises_for_workout(1);
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].order_index, 1);
        assert_eq!(exercises[0].name, "Jumping jacks");
        assert_eq!(exercises[1].order_index, 2);
    }

    #[actix_web::test]
    async fn get_unknown_workout_is_404() {
        let store = web::Data::new(Store::new());
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/v1/workouts/7").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn invalid_duration_is_rejected() {
        let store = web::Data::new(Store::new());
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/v1/workouts")
            .set_json(json!({
                "name": "Bad",
                "durationMinutes": 0,
                "calories": 100,
                "difficulty": "beginner",
                "workoutType": "cardio"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
