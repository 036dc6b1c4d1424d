//! Custom actions for the Staff actor.

/// Toggles whether a staff member takes part in assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffAction {
    Deactivate,
    Reactivate,
}

/// Whether the action changed the active flag.
pub type StaffActionResult = bool;
