//! Identifier derivation for a single parameter.
//!
//! Every artifact refers to a parameter through one of the names derived
//! here, so the set is computed once per entry and shared by all generators.

const MODEL_PREFIX: &str = "f";
const PARAM_SUFFIX: &str = "Param";
const PARAM_ID_PREFIX: &str = "k";
const PARAM_ID_SUFFIX: &str = "Id";
const SAVED_PREFIX: &str = "saved";
const TO_SAVE_PREFIX: &str = "toSave";

/// Names derived from a lower-camel parameter name such as `resampleRate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    /// `ResampleRate`
    pub pascal: String,
    /// Field on the processor model, `fResampleRate`
    pub model: String,
    /// Controller parameter object and UI binding key, `resampleRateParam`
    pub param: String,
    /// Entry in the identifier table, `kResampleRateId`
    pub param_id: String,
    /// Temporary used while restoring state, `savedResampleRate`
    pub saved: String,
    /// Temporary used while persisting state, `toSaveResampleRate`
    pub to_save: String,
}

impl DerivedNames {
    /// Derive the full name set. An empty `name` yields degenerate names
    /// (`f`, `Param`, `kId`, ...); model validation rejects it upstream.
    pub fn derive(name: &str) -> Self {
        let pascal = to_pascal_case(name);
        Self {
            model: format!("{MODEL_PREFIX}{pascal}"),
            param: format!("{name}{PARAM_SUFFIX}"),
            param_id: format!("{PARAM_ID_PREFIX}{pascal}{PARAM_ID_SUFFIX}"),
            saved: format!("{SAVED_PREFIX}{pascal}"),
            to_save: format!("{TO_SAVE_PREFIX}{pascal}"),
            pascal,
        }
    }
}

/// Upper-cases the first character and keeps the rest verbatim.
pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
