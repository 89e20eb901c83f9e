pub mod appointment;
pub mod patient;
