//! The request handed to a driver

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

/// Everything a driver needs to run one action of one installation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub installation: String,

    pub action: String,

    pub bundle: String,

    pub version: String,

    /// Invocation image reference, after relocation
    pub image: String,

    pub image_type: String,

    pub parameters: BTreeMap<String, String>,

    pub credentials: Vec<String>,

    /// Files staged into the invocation image, keyed by target path
    pub files: IndexMap<String, String>,

    /// Outputs the bundle declares
    pub outputs: Vec<String>,
}
