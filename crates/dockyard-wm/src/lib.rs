//! Window-manager side of dockyard: groups windows into applications,
//! drives attention bouncing and serves the shell's dock requests.

pub mod animator;
pub mod application;
pub mod resolver;
pub mod server;
pub mod service;
pub mod timer;

pub use animator::{Animator, NoopAnimator};
pub use application::{
    AppFlags, AppMenu, AppState, Application, ApplicationRegistry, BounceOutcome, BounceSettings,
    MenuAction,
};
pub use resolver::{GroupResolver, WindowHints};
pub use server::{HeadlessWindowServer, WindowServer};
pub use service::{WindowEvent, WindowManagerService, WmHandle, WmInbound};
pub use timer::{TimerFire, TimerKind, TimerSink, TimerTask};
