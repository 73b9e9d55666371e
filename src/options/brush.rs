use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Brush", inline)]
#[serde(default)]
/// Screen-space brush footprint parameters.
pub struct BrushOptions {
    /// Brush radius in pixels.
    #[schemars(title = "Radius", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub screen_radius: f32,
    /// Whether stylus pressure scales the radius.
    #[schemars(title = "Pressure Affects Radius")]
    pub pressure_radius: bool,
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            screen_radius: 50.0,
            pressure_radius: true,
        }
    }
}
