use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Alpha", inline)]
#[serde(default)]
/// Stencil selection.
pub struct AlphaOptions {
    /// Name of the active stencil; `None` brushes at full strength.
    #[schemars(title = "Active Stencil")]
    pub active: Option<String>,
    /// Keep the stencil anchored across continuous stroke sub-steps.
    #[schemars(title = "Pin Stencil Origin")]
    pub keep_origin: bool,
}
