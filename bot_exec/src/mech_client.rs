//! # Mechanisms Client
//!
//! This module provides the abstraction the executable sends actuator demands through. On the
//! bot a driver writes each demand to its motor port, while without hardware the [`LogDriver`]
//! checks and logs them.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::mech::{ActId, MechDems, MAX_POWER, MIN_POWER};
use log::trace;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for sending demands to the actuators.
pub trait MechDriver {
    /// Send one cycle's demands. Every actuator shall have a demand.
    fn send_demands(&mut self, dems: &MechDems) -> Result<(), MechDriverError>;

    /// Command every actuator to zero power.
    fn stop(&mut self) -> Result<(), MechDriverError> {
        self.send_demands(&MechDems::default())
    }
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Driver which logs demands rather than sending them to motors.
#[derive(Default)]
pub struct LogDriver {
    last_dems: Option<MechDems>,
    num_sent: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MechDriverError {
    #[error("No demand was given for {0:?}")]
    MissingDemand(ActId),

    #[error("Demand of {1} for {0:?} is outside the allowed range")]
    OutOfRange(ActId, i32),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LogDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demands most recently accepted by the driver.
    pub fn last_dems(&self) -> Option<&MechDems> {
        self.last_dems.as_ref()
    }

    pub fn num_sent(&self) -> u64 {
        self.num_sent
    }
}

impl MechDriver for LogDriver {
    fn send_demands(&mut self, dems: &MechDems) -> Result<(), MechDriverError> {
        check_dems(dems)?;

        for id in ActId::all_ids() {
            trace!("Motor port {:>2} ({:?}): {}", port(*id), id, dems.get(*id));
        }

        self.last_dems = Some(dems.clone());
        self.num_sent += 1;

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Motor port each actuator is wired to.
pub fn port(id: ActId) -> u8 {
    match id {
        ActId::Debug => 1,
        ActId::DrvRightFront => 2,
        ActId::DrvRightBack => 3,
        ActId::DrvLeftBack => 4,
        ActId::DrvLeftFront => 5,
        ActId::Tray => 6,
        ActId::RollerRight => 7,
        ActId::RollerLeft => 8,
        ActId::ArmRight => 9,
        ActId::ArmLeft => 10,
    }
}

/// Check that a set of demands covers every actuator and is within range.
pub fn check_dems(dems: &MechDems) -> Result<(), MechDriverError> {
    for id in ActId::all_ids() {
        match dems.power.get(id) {
            Some(p) if *p < MIN_POWER || *p > MAX_POWER => {
                return Err(MechDriverError::OutOfRange(*id, *p))
            }
            Some(_) => (),
            None => return Err(MechDriverError::MissingDemand(*id)),
        }
    }

    Ok(())
}
