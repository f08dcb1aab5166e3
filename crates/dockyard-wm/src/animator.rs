use dockyard_common::{LaunchId, Point, WindowId};

/// Drives on-screen animations. Both calls return `true` when the animation
/// keeps running and a completion event will follow, `false` when it is
/// already over.
pub trait Animator: Send {
    fn bounce(&self, leader: WindowId) -> bool;

    fn slide(&self, id: LaunchId, from: Point, to: Point) -> bool;
}

/// Finishes every animation immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnimator;

impl Animator for NoopAnimator {
    fn bounce(&self, _leader: WindowId) -> bool {
        false
    }

    fn slide(&self, _id: LaunchId, _from: Point, _to: Point) -> bool {
        false
    }
}
