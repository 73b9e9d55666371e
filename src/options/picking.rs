use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
/// Picking behavior toggles.
pub struct PickingOptions {
    /// Also pick through each mesh's mirror plane.
    #[schemars(title = "Symmetry")]
    pub symmetry: bool,
    /// Grow selections through mesh connectivity instead of pure distance.
    #[schemars(title = "Topological Selection")]
    pub topological: bool,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            symmetry: true,
            topological: false,
        }
    }
}
