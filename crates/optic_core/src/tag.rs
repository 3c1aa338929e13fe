//! Camera type tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque label identifying a kind of camera (e.g. `"camera.aiming"`)
///
/// Tags are never interpreted by the camera engine. They flow through to UI
/// consumers alongside the top layer's blend weight.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraTag(String);

impl CameraTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CameraTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CameraTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CameraTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
