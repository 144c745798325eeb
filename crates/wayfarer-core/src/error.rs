//! Simulation error type - precondition violations fail fast at the
//! operation boundary.

/// Errors returned by ship roster and dispatch operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// No crew member registered under this name
    UnknownCrew(String),
    /// No room registered under this name
    UnknownRoom(String),
    /// No equipment registered under this name
    UnknownEquipment(String),
    /// A room, crew member or equipment with this name already exists
    DuplicateName(String),
    /// The named equipment's owning room is no longer part of the ship
    DetachedRoom(String),
    /// The named crew member already has a walk plan in flight
    WalkInProgress(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::UnknownCrew(name) => write!(f, "unknown crew member: {}", name),
            SimError::UnknownRoom(name) => write!(f, "unknown room: {}", name),
            SimError::UnknownEquipment(name) => write!(f, "unknown equipment: {}", name),
            SimError::DuplicateName(name) => write!(f, "name already registered: {}", name),
            SimError::DetachedRoom(name) => {
                write!(f, "equipment {} references a room not on this ship", name)
            }
            SimError::WalkInProgress(name) => {
                write!(f, "crew member {} already has a walk in flight", name)
            }
        }
    }
}

impl std::error::Error for SimError {}
