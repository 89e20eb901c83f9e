pub mod appointment;
pub mod envelope;
pub mod patient;
