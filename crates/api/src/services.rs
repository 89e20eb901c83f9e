//! Business operations over the repository traits.
//!
//! Services receive their repositories through `new`; nothing is looked up
//! globally.

pub mod appointment;
pub mod patient;

pub use appointment::AppointmentService;
pub use patient::PatientService;
