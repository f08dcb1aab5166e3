//! Application registry: windows grouped by leader into running
//! application instances.

mod bounce;
mod focus;
mod menu;
mod registry;
mod types;

pub use bounce::{BounceOutcome, BounceSettings};
pub use focus::Activation;
pub use menu::{AppMenu, MenuAction, MenuItem};
pub use registry::ApplicationRegistry;
pub use types::*;
