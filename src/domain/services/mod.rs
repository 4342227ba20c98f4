//! Pure domain rules.

mod identity_cascade;
mod senryu_classifier;

pub use identity_cascade::IdentityCascade;
pub use senryu_classifier::SenryuClassifier;
