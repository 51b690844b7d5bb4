mod handlers;
mod models;
mod store;
mod utils;
mod errors;

use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use std::env;
use log::info;
use env_logger::Env;
use actix_web::middleware::Logger;
use std::collections::HashMap;

use crate::models::pet::PetType;
use crate::models::workout::{Difficulty, WorkoutType};
use crate::store::Store;

/// Seeds the demo identity and the static workout catalog. Runs once,
/// in order, before the server binds.
fn seed_store(store: &Store) {
    let user = store.create_user("demo");
    let pet = store.create_pet(user.id, PetType::Dog);
    info!("seeded user {} with pet {}", user.username, pet.id);

    let run = store.create_workout(
        "Morning Run",
        "Easy-paced run to start the day",
        30,
        250,
        Difficulty::Beginner,
        WorkoutType::Cardio,
    );
    store.create_exercise(run.id, 1, "Warm-up walk", None, None, Some(300));
    store.create_exercise(run.id, 2, "Steady run", None, None, Some(1200));
    store.create_exercise(run.id, 3, "Cool-down stretch", None, None, Some(300));

    let strength = store.create_workout(
        "Full Body Strength",
        "Bodyweight circuit, no equipment needed",
        45,
        320,
        Difficulty::Intermediate,
        WorkoutType::Strength,
    );
    store.create_exercise(strength.id, 1, "Push-ups", Some(12), Some(3), None);
    store.create_exercise(strength.id, 2, "Squats", Some(15), Some(3), None);
    store.create_exercise(strength.id, 3, "Plank", None, Some(3), Some(60));

    let yoga = store.create_workout(
        "Evening Yoga",
        "Wind-down flow for flexibility",
        20,
        90,
        Difficulty::Beginner,
        WorkoutType::Flexibility,
    );
    store.create_exercise(yoga.id, 1, "Sun salutation", None, Some(4), None);
    store.create_exercise(yoga.id, 2, "Pigeon pose", None, None, Some(120));

    info!("seeded {} workout templates", store.list_workouts().len());
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // In-memory store; state is lost on restart
    let store = web::Data::new(Store::new());
    seed_store(&store);

    // Fetch the server bind address from an environment variable, default to "127.0.0.1:8080"
    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {}", bind_address);

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "fitpet".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .expect("Failed to create Prometheus metrics");

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .app_data(store.clone()) // In-memory store
            .service(
                web::resource("/v1/users/{userId}")
                    .route(web::get().to(handlers::users::get_user)),
            )
            .service(
                web::resource("/v1/users/{userId}/stats")
                    .route(web::post().to(handlers::users::update_stats)),
            )
            .service(
                web::resource("/v1/users/{userId}/workouts")
                    .route(web::get().to(handlers::user_workouts::list_assignments))
                    .route(web::post().to(handlers::user_workouts::schedule_workout)),
            )
            .service(
                web::resource("/v1/user-workouts/{id}/complete")
                    .route(web::post().to(handlers::user_workouts::complete_workout)),
            )
            .service(
                web::resource("/v1/workouts")
                    .route(web::get().to(handlers::workouts::list_workouts))
                    .route(web::post().to(handlers::workouts::create_workout)),
            )
            .service(
                web::resource("/v1/workouts/{workoutId}")
                    .route(web::get().to(handlers::workouts::get_workout)),
            )
            .service(
                web::resource("/v1/pets/{petId}")
                    .route(web::get().to(handlers::pets::get_pet))
                    .route(web::patch().to(handlers::pets::update_pet)),
            )
            .service(
                web::resource("/v1/pets/{petId}/mood")
                    .route(web::get().to(handlers::pets::get_mood)),
            )
            .service(
                web::resource("/v1/pets/{petId}/feed")
                    .route(web::post().to(handlers::pets::feed_pet)),
            )
            .service(
                web::resource("/v1/pets/{petId}/play")
                    .route(web::post().to(handlers::pets::play_with_pet)),
            )
            .service(
                web::resource("/v1/pets/{petId}/groom")
                    .route(web::post().to(handlers::pets::groom_pet)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
