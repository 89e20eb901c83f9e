/// Mapping of domain errors onto HTTP envelopes
pub mod error_handling;
/// Validated request body extraction that reports failures as envelopes
pub mod extract;
