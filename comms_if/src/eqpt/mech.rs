//! # Mechanisms Equipment Commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Highest power that can be demanded of a motor.
pub const MAX_POWER: i32 = 127;

/// Lowest power that can be demanded of a motor.
pub const MIN_POWER: i32 = -127;

const ALL_IDS: [ActId; 10] = [
    ActId::DrvLeftFront,
    ActId::DrvLeftBack,
    ActId::DrvRightFront,
    ActId::DrvRightBack,
    ActId::Tray,
    ActId::RollerRight,
    ActId::RollerLeft,
    ActId::ArmRight,
    ActId::ArmLeft,
    ActId::Debug,
];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands that are sent to the motor driver each cycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MechDems {
    /// The demanded power of each actuator, between `MIN_POWER` and `MAX_POWER`.
    pub power: HashMap<ActId, i32>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all actuators available to the bot
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum ActId {
    DrvLeftFront,
    DrvLeftBack,
    DrvRightFront,
    DrvRightBack,
    Tray,
    RollerRight,
    RollerLeft,
    ArmRight,
    ArmLeft,
    /// Spare motor port driven by the debug toggle
    Debug,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl ActId {
    /// All actuator IDs, in port order.
    pub fn all_ids() -> &'static [ActId] {
        &ALL_IDS
    }

    pub fn left_drv_ids() -> [ActId; 2] {
        [ActId::DrvLeftFront, ActId::DrvLeftBack]
    }

    pub fn right_drv_ids() -> [ActId; 2] {
        [ActId::DrvRightFront, ActId::DrvRightBack]
    }

    pub fn arm_ids() -> [ActId; 2] {
        [ActId::ArmRight, ActId::ArmLeft]
    }
}

impl MechDems {
    /// Demands with no actuators in them, used by modules which only drive some actuators.
    pub fn empty() -> Self {
        Self {
            power: HashMap::new(),
        }
    }

    /// Set the power of an actuator, saturating it into the allowed range.
    pub fn set(&mut self, id: ActId, power: i32) {
        self.power.insert(id, clamp_power(power));
    }

    /// Get the demanded power of an actuator, 0 if none has been demanded.
    pub fn get(&self, id: ActId) -> i32 {
        self.power.get(&id).copied().unwrap_or(0)
    }

    /// Returns true if this set of demands contains a demand for `id`.
    pub fn contains(&self, id: ActId) -> bool {
        self.power.contains_key(&id)
    }

    /// Copy every demand from `other` into these demands, replacing existing values.
    pub fn merge(&mut self, other: &MechDems) {
        for (id, power) in other.power.iter() {
            self.set(*id, *power);
        }
    }
}

impl Default for MechDems {
    fn default() -> Self {
        let mut power = HashMap::new();

        for id in ActId::all_ids() {
            power.insert(*id, 0);
        }

        Self { power }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Saturate a power value into `[MIN_POWER, MAX_POWER]`.
pub fn clamp_power(power: i32) -> i32 {
    power.clamp(MIN_POWER, MAX_POWER)
}
