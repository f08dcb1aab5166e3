pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, DockError, DockyardError, GatewayError, PlatformError};
pub use id::{new_correlation_id, LaunchId, TimerId};
pub use types::{LaunchTarget, Point, ScreenInfo, ShutdownMode, WindowId, WindowState};

pub type Result<T> = std::result::Result<T, DockyardError>;
