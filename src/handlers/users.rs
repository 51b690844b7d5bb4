use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::store::Store;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    #[validate(required(message = "caloriesBurned is required"))]
    #[validate(range(min = 0, message = "caloriesBurned must be non-negative"))]
    calories_burned: Option<i64>,

    #[validate(required(message = "activeMinutes is required"))]
    #[validate(range(min = 0, message = "activeMinutes must be non-negative"))]
    active_minutes: Option<i64>,

    #[validate(required(message = "completedWorkouts is required"))]
    #[validate(range(min = 0, message = "completedWorkouts must be non-negative"))]
    completed_workouts: Option<i64>,
}

// GET /v1/users/{userId}
pub async fn get_user(
    store: web::Data<Store>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = store
        .get_user(*user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user))
}

// POST /v1/users/{userId}/stats
//
// Also reached by the completion flow, but callable on its own so clients
// can report activity done outside a scheduled workout.
pub async fn update_stats(
    store: web::Data<Store>,
    user_id: web::Path<i64>,
    payload: web::Json<StatsRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let mut user = store
        .get_user(*user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    user.add_stats(
        payload.calories_burned.unwrap(),
        payload.active_minutes.unwrap(),
        payload.completed_workouts.unwrap(),
    );
    store.save_user(user.clone());

    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    fn app_store() -> web::Data<Store> {
        let store = Store::new();
        store.create_user("demo");
        web::Data::new(store)
    }

    macro_rules! test_app {
        ($store:expr) => {
            test::init_service(
                App::new().app_data($store.clone()).service(
                    web::resource("/v1/users/{userId}/stats")
                        .route(web::post().to(update_stats)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn stats_accumulate_across_calls() {
        let store = app_store();
        let app = test_app!(store);

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/v1/users/1/stats")
                .set_json(json!({
                    "caloriesBurned": 50,
                    "activeMinutes": 10,
                    "completedWorkouts": 1
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200);
        }

        let user = store.get_user(1).unwrap();
        assert_eq!(user.calories_burned, 100);
        assert_eq!(user.active_minutes, 20);
        assert_eq!(user.completed_workouts, 2);
    }

    #[actix_web::test]
    async fn negative_delta_is_rejected() {
        let store = app_store();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/v1/users/1/stats")
            .set_json(json!({
                "caloriesBurned": -10,
                "activeMinutes": 5,
                "completedWorkouts": 0
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let user = store.get_user(1).unwrap();
        assert_eq!(user.calories_burned, 0);
    }

    #[actix_web::test]
    async fn unknown_user_is_404() {
        let store = app_store();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/v1/users/99/stats")
            .set_json(json!({
                "caloriesBurned": 10,
                "activeMinutes": 5,
                "completedWorkouts": 0
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
