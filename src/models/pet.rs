use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

pub const ATTR_MIN: i32 = 0;
pub const ATTR_MAX: i32 = 100;

/// XP per level; level is derived from xp, never stored independently.
const XP_PER_LEVEL: i64 = 100;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
    Dragon,
    Penguin,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub user_id: i64,
    pub pet_type: PetType,
    pub health: i32,
    pub hunger: i32,
    pub happiness: i32,
    pub level: i32,
    pub xp: i64,
    pub last_fed: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
    pub last_groomed: DateTime<Utc>,
}

/// Partial update for PATCH /v1/pets/{id}. Only these fields are legally
/// updatable; xp and level are earned, not set.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    pub pet_type: Option<PetType>,
    pub health: Option<i32>,
    pub hunger: Option<i32>,
    pub happiness: Option<i32>,
    pub last_fed: Option<DateTime<Utc>>,
    pub last_played: Option<DateTime<Utc>>,
    pub last_groomed: Option<DateTime<Utc>>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Hungry,
    Unhappy,
    Unhealthy,
    Happy,
    Neutral,
}

impl Mood {
    pub fn message(&self) -> &'static str {
        match self {
            Mood::Hungry => "Your pet is hungry! Feed it to keep it going.",
            Mood::Unhappy => "Your pet is feeling down. Play with it!",
            Mood::Unhealthy => "Your pet needs some care. A grooming would help.",
            Mood::Happy => "Your pet is thriving. Keep up the workouts!",
            Mood::Neutral => "Your pet is doing fine.",
        }
    }
}

fn clamp_attr(value: i32) -> i32 {
    value.clamp(ATTR_MIN, ATTR_MAX)
}

impl Pet {
    pub fn feed(&mut self, now: DateTime<Utc>) {
        self.hunger = clamp_attr(self.hunger + 20);
        self.last_fed = now;
    }

    pub fn play(&mut self, now: DateTime<Utc>) {
        self.hunger = clamp_attr(self.hunger - 5);
        self.happiness = clamp_attr(self.happiness + 15);
        self.last_played = now;
    }

    pub fn groom(&mut self, now: DateTime<Utc>) {
        self.health = clamp_attr(self.health + 10);
        self.last_groomed = now;
    }

    /// Workout-driven update: no care timestamp is touched, xp is awarded
    /// proportionally to calories burned and never clamped.
    pub fn record_workout(&mut self, calories: i32) {
        self.happiness = clamp_attr(self.happiness + 10);
        self.health = clamp_attr(self.health + 5);
        self.xp += (f64::from(calories) / 5.0).round() as i64;
        self.level = 1 + (self.xp / XP_PER_LEVEL) as i32;
    }

    /// Merges a partial update, then re-applies the [0,100] clamp to the
    /// bounded attributes regardless of which fields were supplied.
    pub fn apply(&mut self, update: &PetUpdate) {
        if let Some(pet_type) = update.pet_type {
            self.pet_type = pet_type;
        }
        if let Some(health) = update.health {
            self.health = health;
        }
        if let Some(hunger) = update.hunger {
            self.hunger = hunger;
        }
        if let Some(happiness) = update.happiness {
            self.happiness = happiness;
        }
        if let Some(last_fed) = update.last_fed {
            self.last_fed = last_fed;
        }
        if let Some(last_played) = update.last_played {
            self.last_played = last_played;
        }
        if let Some(last_groomed) = update.last_groomed {
            self.last_groomed = last_groomed;
        }
        self.health = clamp_attr(self.health);
        self.hunger = clamp_attr(self.hunger);
        self.happiness = clamp_attr(self.happiness);
    }

    /// Threshold classification, first match wins. Hunger dominates
    /// happiness and health as the most urgent signal.
    pub fn mood(&self) -> Mood {
        if self.hunger < 30 {
            Mood::Hungry
        } else if self.happiness < 30 {
            Mood::Unhappy
        } else if self.health < 30 {
            Mood::Unhealthy
        } else if self.happiness > 80 && self.health > 80 {
            Mood::Happy
        } else {
            Mood::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet() -> Pet {
        let now = Utc::now();
        Pet {
            id: 1,
            user_id: 1,
            pet_type: PetType::Dog,
            health: 50,
            hunger: 50,
            happiness: 50,
            level: 1,
            xp: 0,
            last_fed: now,
            last_played: now,
            last_groomed: now,
        }
    }

    #[test]
    fn feed_caps_hunger_at_100() {
        let mut p = pet();
        p.hunger = 90;
        p.feed(Utc::now());
        assert_eq!(p.hunger, 100);
        p.feed(Utc::now());
        assert_eq!(p.hunger, 100);
    }

    #[test]
    fn play_floors_hunger_at_0() {
        let mut p = pet();
        p.hunger = 3;
        p.happiness = 95;
        p.play(Utc::now());
        assert_eq!(p.hunger, 0);
        assert_eq!(p.happiness, 100);
    }

    #[test]
    fn groom_caps_health() {
        let mut p = pet();
        p.health = 97;
        p.groom(Utc::now());
        assert_eq!(p.health, 100);
    }

    #[test]
    fn workout_awards_rounded_xp() {
        let mut p = pet();
        p.record_workout(120);
        assert_eq!(p.xp, 24);
        p.record_workout(12);
        // 12 / 5 = 2.4, rounds to 2
        assert_eq!(p.xp, 26);
    }

    #[test]
    fn workout_levels_up_every_100_xp() {
        let mut p = pet();
        p.record_workout(600);
        assert_eq!(p.xp, 120);
        assert_eq!(p.level, 2);
    }

    #[test]
    fn workout_caps_happiness_and_health() {
        let mut p = pet();
        p.happiness = 95;
        p.health = 98;
        p.record_workout(50);
        assert_eq!(p.happiness, 100);
        assert_eq!(p.health, 100);
    }

    #[test]
    fn apply_clamps_both_bounds() {
        let mut p = pet();
        p.apply(&PetUpdate {
            health: Some(-5),
            happiness: Some(250),
            ..PetUpdate::default()
        });
        assert_eq!(p.health, 0);
        assert_eq!(p.happiness, 100);
        assert_eq!(p.hunger, 50);
    }

    #[test]
    fn apply_changes_pet_type() {
        let mut p = pet();
        p.apply(&PetUpdate {
            pet_type: Some(PetType::Dragon),
            ..PetUpdate::default()
        });
        assert_eq!(p.pet_type, PetType::Dragon);
    }

    #[test]
    fn hunger_takes_precedence_over_happy() {
        let mut p = pet();
        p.hunger = 20;
        p.happiness = 90;
        p.health = 90;
        assert_eq!(p.mood(), Mood::Hungry);
    }

    #[test]
    fn mood_precedence_order() {
        let mut p = pet();
        p.hunger = 50;
        p.happiness = 20;
        p.health = 10;
        assert_eq!(p.mood(), Mood::Unhappy);
        p.happiness = 50;
        assert_eq!(p.mood(), Mood::Unhealthy);
        p.health = 90;
        p.happiness = 90;
        assert_eq!(p.mood(), Mood::Happy);
        p.happiness = 80;
        assert_eq!(p.mood(), Mood::Neutral);
    }
}
