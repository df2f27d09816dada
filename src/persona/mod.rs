//! Yaddoo's voice: canned replies, the prompt, and output clean-up.

pub mod normalize;
pub mod prompt;
pub mod rules;

pub use normalize::normalize;
pub use rules::classify;
