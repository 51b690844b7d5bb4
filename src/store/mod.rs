use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::models::pet::{Pet, PetType};
use crate::models::user::User;
use crate::models::workout::{Difficulty, Exercise, UserWorkout, Workout, WorkoutType};

/// In-memory keyed storage with monotonic per-entity id allocation.
/// Injected into handlers via `web::Data<Store>`. Reads hand out clones;
/// read-modify-write across two requests is last-write-wins.
pub struct Store {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    users: HashMap<i64, User>,
    pets: HashMap<i64, Pet>,
    workouts: HashMap<i64, Workout>,
    exercises: HashMap<i64, Exercise>,
    user_workouts: HashMap<i64, UserWorkout>,
    next_user_id: i64,
    next_pet_id: i64,
    next_workout_id: i64,
    next_exercise_id: i64,
    next_user_workout_id: i64,
}

fn alloc(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl Store {
    pub fn new() -> Self {
        Store {
            inner: Mutex::new(StoreInner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    // Users

    pub fn create_user(&self, username: &str) -> User {
        let mut inner = self.lock();
        let user = User {
            id: alloc(&mut inner.next_user_id),
            username: username.to_string(),
            calories_burned: 0,
            active_minutes: 0,
            completed_workouts: 0,
            streak: 0,
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        user
    }

    pub fn get_user(&self, id: i64) -> Option<User> {
        self.lock().users.get(&id).cloned()
    }

    pub fn save_user(&self, user: User) {
        self.lock().users.insert(user.id, user);
    }

    // Pets

    pub fn create_pet(&self, user_id: i64, pet_type: PetType) -> Pet {
        let mut inner = self.lock();
        let now = Utc::now();
        let pet = Pet {
            id: alloc(&mut inner.next_pet_id),
            user_id,
            pet_type,
            health: 100,
            hunger: 100,
            happiness: 100,
            level: 1,
            xp: 0,
            last_fed: now,
            last_played: now,
            last_groomed: now,
        };
        inner.pets.insert(pet.id, pet.clone());
        pet
    }

    pub fn get_pet(&self, id: i64) -> Option<Pet> {
        self.lock().pets.get(&id).cloned()
    }

    pub fn get_pet_by_user(&self, user_id: i64) -> Option<Pet> {
        self.lock()
            .pets
            .values()
            .find(|pet| pet.user_id == user_id)
            .cloned()
    }

    pub fn save_pet(&self, pet: Pet) {
        self.lock().pets.insert(pet.id, pet);
    }

    // Workout templates and exercises

    pub fn create_workout(
        &self,
        name: &str,
        description: &str,
        duration_minutes: i32,
        calories: i32,
        difficulty: Difficulty,
        workout_type: WorkoutType,
    ) -> Workout {
        let mut inner = self.lock();
        let workout = Workout {
            id: alloc(&mut inner.next_workout_id),
            name: name.to_string(),
            description: description.to_string(),
            duration_minutes,
            calories,
            difficulty,
            workout_type,
        };
        inner.workouts.insert(workout.id, workout.clone());
        workout
    }

    pub fn get_workout(&self, id: i64) -> Option<Workout> {
        self.lock().workouts.get(&id).cloned()
    }

    pub fn list_workouts(&self) -> Vec<Workout> {
        let inner = self.lock();
        let mut workouts: Vec<Workout> = inner.workouts.values().cloned().collect();
        workouts.sort_by_key(|w| w.id);
        workouts
    }

    pub fn create_exercise(
        &self,
        workout_id: i64,
        order_index: i32,
        name: &str,
        reps: Option<i32>,
        sets: Option<i32>,
        duration_seconds: Option<i32>,
    ) -> Exercise {
        let mut inner = self.lock();
        let exercise = Exercise {
            id: alloc(&mut inner.next_exercise_id),
            workout_id,
            order_index,
            name: name.to_string(),
            reps,
            sets,
            duration_seconds,
        };
        inner.exercises.insert(exercise.id, exercise.clone());
        exercise
    }

    pub fn exercises_for_workout(&self, workout_id: i64) -> Vec<Exercise> {
        let inner = self.lock();
        let mut exercises: Vec<Exercise> = inner
            .exercises
            .values()
            .filter(|e| e.workout_id == workout_id)
            .cloned()
            .collect();
        exercises.sort_by_key(|e| e.order_index);
        exercises
    }

    // Assignments

    pub fn create_user_workout(
        &self,
        user_id: i64,
        workout_id: i64,
        scheduled_for: DateTime<Utc>,
    ) -> UserWorkout {
        let mut inner = self.lock();
        let assignment = UserWorkout {
            id: alloc(&mut inner.next_user_workout_id),
            user_id,
            workout_id,
            scheduled_for,
            completed: false,
            completed_at: None,
        };
        inner.user_workouts.insert(assignment.id, assignment.clone());
        assignment
    }

    pub fn get_user_workout(&self, id: i64) -> Option<UserWorkout> {
        self.lock().user_workouts.get(&id).cloned()
    }

    pub fn list_user_workouts(&self, user_id: i64) -> Vec<UserWorkout> {
        let inner = self.lock();
        let mut assignments: Vec<UserWorkout> = inner
            .user_workouts
            .values()
            .filter(|uw| uw.user_id == user_id)
            .cloned()
            .collect();
        assignments.sort_by_key(|uw| uw.id);
        assignments
    }

    pub fn save_user_workout(&self, assignment: UserWorkout) {
        self.lock().user_workouts.insert(assignment.id, assignment);
    }
}
