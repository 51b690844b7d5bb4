pub mod pets;
pub mod user_workouts;
pub mod users;
pub mod workouts;
