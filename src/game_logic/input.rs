use crate::game_logic::PhysicsInput;
use bevy::prelude::*;
use std::collections::HashMap;

const FORWARD_KEYS: [&str; 2] = ["ArrowUp", "w"];
const BACKWARD_KEYS: [&str; 2] = ["ArrowDown", "s"];
const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "a"];
const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "d"];

/// Which keys are held right now, by raw key name.
///
/// Written by press/release events, polled once per frame by the physics step.
/// A key held across N frames reads as held on all N polls.
#[derive(Resource, Clone, Debug, Default)]
pub struct InputSampler {
    held: HashMap<String, bool>,
}

impl InputSampler {
    pub fn press(&mut self, key: &str) {
        self.held.insert(key_id(key), true);
    }

    pub fn release(&mut self, key: &str) {
        self.held.insert(key_id(key), false);
    }

    /// Forget everything, e.g. when the window loses focus and release events go elsewhere.
    pub fn release_all(&mut self) {
        for held in self.held.values_mut() {
            *held = false;
        }
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(&key_id(key)).copied().unwrap_or(false)
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.is_held(key))
    }

    /// Resolve held keys into driving controls. Opposite directions can both be set.
    pub fn controls(&self) -> PhysicsInput {
        PhysicsInput {
            forward: self.any_held(&FORWARD_KEYS),
            backward: self.any_held(&BACKWARD_KEYS),
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
        }
    }
}

// Single characters are case-folded so Caps Lock doesn't kill WASD
fn key_id(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_lowercase().collect(),
        _ => key.to_string(),
    }
}
