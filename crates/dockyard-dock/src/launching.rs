use std::time::Instant;

use dockyard_common::{LaunchId, LaunchTarget, Point};
use serde::{Deserialize, Serialize};

/// Snapshot of an icon's rendered pixels at launch time. Opaque here;
/// decoding and drawing belong to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl IconImage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An application launch in flight, animating from where the user started
/// it toward its icon position.
#[derive(Debug, Clone)]
pub struct LaunchingIcon {
    pub id: LaunchId,
    pub name: String,
    pub image: IconImage,
    pub source_point: Point,
    pub destination: Point,
    pub image_path: String,
    pub target: LaunchTarget,
    /// Set once the slide animation has landed.
    pub placed: bool,
    pub created_at: Instant,
}
