//! Feature Engineering Engine
//!
//! Parses compound feature identifiers (`<channel>__<calculator>[__<params>]`),
//! translates them into C fragments for embedded targets and evaluates the
//! same calculators host-side.

mod features;
mod identifier;
mod statistics;
mod translator;

pub use features::{extract_all, extract_window_features};
pub use identifier::FeatureIdentifier;
pub use statistics::Calculator;
pub use translator::{
    translate, translate_str, variable_name, TranslatedFeature, BUFFER_IDENT, LENGTH_IDENT,
    MAX_IDENT_LEN,
};

use thiserror::Error;

/// Errors while parsing or evaluating features
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeatureError {
    #[error("Malformed feature identifier '{0}': expected <channel>__<calculator>[__<params>]")]
    MalformedIdentifier(String),
    #[error("Feature '{feature}' references unknown channel '{channel}'")]
    UnknownChannel { feature: String, channel: String },
}
