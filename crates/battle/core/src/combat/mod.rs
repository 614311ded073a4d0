//! Damage rolling.
//!
//! Pure functions; all randomness comes in through RNG oracle seeds.

mod roll;

pub use roll::{roll_attack_damage, DamageRoll, RollSpec};
