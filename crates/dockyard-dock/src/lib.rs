pub mod autolaunch;
pub mod dock;
pub mod launcher;
pub mod launching;
pub mod placement;
pub mod slot;

pub use autolaunch::{auto_launch, LaunchReport};
pub use dock::{Dock, DockBatch};
pub use launcher::{CommandLauncher, Launcher};
pub use launching::{IconImage, LaunchingIcon};
pub use placement::{GridPlacer, IconPlacer};
pub use slot::DockSlot;
