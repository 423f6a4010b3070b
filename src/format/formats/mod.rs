//! Annotation format implementations.

pub mod vot;

#[cfg(test)]
mod tests;

pub use vot::VotFormat;
