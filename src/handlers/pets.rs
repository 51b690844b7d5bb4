use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::pet::{Mood, Pet, PetUpdate};
use crate::store::Store;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PetResponse {
    #[serde(flatten)]
    pet: Pet,
    mood: Mood,
    message: &'static str,
}

impl PetResponse {
    fn from(pet: Pet) -> Self {
        let mood = pet.mood();
        PetResponse {
            pet,
            mood,
            message: mood.message(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MotivationResponse {
    mood: &'static str,
    message: &'static str,
}

// Motivational copy for the UI. Same numeric attributes as the core
// classifier, but a six-way split for variety.
fn motivational_mood(pet: &Pet) -> MotivationResponse {
    let (mood, message) = if pet.hunger < 30 {
        ("hungry", "Someone's tummy is rumbling. Time for a snack!")
    } else if pet.health < 30 {
        ("tired", "Your pet is worn out. A little grooming goes a long way.")
    } else if pet.happiness < 30 {
        ("sad", "Your pet misses you. How about a quick play session?")
    } else if pet.happiness > 80 && pet.health > 80 && pet.hunger > 80 {
        ("excited", "Your pet can barely sit still. Crush that next workout!")
    } else if pet.happiness > 80 && pet.health > 80 {
        ("happy", "Your pet is beaming. Your consistency is paying off!")
    } else {
        ("sleeping", "Your pet is napping peacefully. See you at the next workout.")
    };
    MotivationResponse { mood, message }
}

fn fetch_pet(store: &Store, id: i64) -> Result<Pet, AppError> {
    store
        .get_pet(id)
        .ok_or_else(|| AppError::NotFound("Pet not found".to_string()))
}

// GET /v1/pets/{petId}
pub async fn get_pet(
    store: web::Data<Store>,
    pet_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let pet = fetch_pet(&store, *pet_id)?;
    Ok(HttpResponse::Ok().json(PetResponse::from(pet)))
}

// GET /v1/pets/{petId}/mood
pub async fn get_mood(
    store: web::Data<Store>,
    pet_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let pet = fetch_pet(&store, *pet_id)?;
    Ok(HttpResponse::Ok().json(motivational_mood(&pet)))
}

// POST /v1/pets/{petId}/feed
pub async fn feed_pet(
    store: web::Data<Store>,
    pet_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let mut pet = fetch_pet(&store, *pet_id)?;
    pet.feed(Utc::now());
    store.save_pet(pet.clone());
    Ok(HttpResponse::Ok().json(PetResponse::from(pet)))
}

// POST /v1/pets/{petId}/play
pub async fn play_with_pet(
    store: web::Data<Store>,
    pet_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let mut pet = fetch_pet(&store, *pet_id)?;
    pet.play(Utc::now());
    store.save_pet(pet.clone());
    Ok(HttpResponse::Ok().json(PetResponse::from(pet)))
}

// POST /v1/pets/{petId}/groom
pub async fn groom_pet(
    store: web::Data<Store>,
    pet_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let mut pet = fetch_pet(&store, *pet_id)?;
    pet.groom(Utc::now());
    store.save_pet(pet.clone());
    Ok(HttpResponse::Ok().json(PetResponse::from(pet)))
}

// PATCH /v1/pets/{petId}
pub async fn update_pet(
    store: web::Data<Store>,
    pet_id: web::Path<i64>,
    payload: web::Json<PetUpdate>,
) -> Result<HttpResponse, AppError> {
    let mut pet = fetch_pet(&store, *pet_id)?;
    pet.apply(&payload);
    store.save_pet(pet.clone());
    Ok(HttpResponse::Ok().json(PetResponse::from(pet)))
}
