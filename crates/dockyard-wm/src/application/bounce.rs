//! Attention bouncing, one-shot and while urgent.

use std::sync::Arc;
use std::time::Duration;

use dockyard_common::WindowId;
use dockyard_config::schema::BounceConfig;
use tracing::{debug, trace};

use super::registry::ApplicationRegistry;
use crate::timer::{TimerFire, TimerKind, TimerTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BounceSettings {
    pub interval: Duration,
    pub animations: bool,
}

impl Default for BounceSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            animations: true,
        }
    }
}

impl From<&BounceConfig> for BounceSettings {
    fn from(config: &BounceConfig) -> Self {
        Self {
            interval: config.interval(),
            animations: config.animations,
        }
    }
}

/// Result of a bounce request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceOutcome {
    /// Animation should start now.
    Started,
    /// Swallowed by `skip_next_animation`, which is now cleared.
    Suppressed,
    AlreadyBouncing,
    /// Animations are turned off.
    Disabled,
    NoSuchApp,
}

impl ApplicationRegistry {
    pub fn bounce_settings(&self) -> BounceSettings {
        self.bounce
    }

    /// Request one attention bounce for `leader`.
    ///
    /// A pending `skip_next_animation` is consumed by this attempt whether
    /// or not the bounce would otherwise have run.
    pub fn bounce(&mut self, leader: WindowId) -> BounceOutcome {
        let animations = self.bounce.animations;
        let Some(app) = self.apps.get_mut(&leader) else {
            return BounceOutcome::NoSuchApp;
        };

        if app.flags.skip_next_animation {
            app.flags.skip_next_animation = false;
            debug!(%leader, "bounce suppressed");
            return BounceOutcome::Suppressed;
        }
        if !animations {
            return BounceOutcome::Disabled;
        }
        if app.flags.bouncing {
            return BounceOutcome::AlreadyBouncing;
        }

        app.flags.bouncing = true;
        trace!(%leader, "bounce");
        BounceOutcome::Started
    }

    /// The bounce animation for `leader` completed.
    pub fn bounce_finished(&mut self, leader: WindowId) {
        if let Some(app) = self.apps.get_mut(&leader) {
            app.flags.bouncing = false;
        }
    }

    /// Bounce now and keep bouncing every interval until cancelled.
    /// Re-arming replaces the previous timer.
    pub fn bounce_while_urgent(&mut self, leader: WindowId) -> BounceOutcome {
        let sink = Arc::clone(&self.timers);
        let interval = self.bounce.interval;
        let Some(app) = self.apps.get_mut(&leader) else {
            return BounceOutcome::NoSuchApp;
        };

        let timer = TimerTask::repeating(sink, TimerKind::UrgentBounce(leader), interval);
        debug!(%leader, timer = %timer.id(), "urgent bounce armed");
        if let Some(previous) = app.urgent_bounce_timer.replace(timer) {
            previous.cancel();
        }
        self.bounce(leader)
    }

    /// Stop urgent bouncing for `leader`. Returns whether a timer was armed.
    pub fn cancel_urgent_bounce(&mut self, leader: WindowId) -> bool {
        let Some(app) = self.apps.get_mut(&leader) else {
            return false;
        };
        app.urgent_windows.clear();
        match app.urgent_bounce_timer.take() {
            Some(timer) => {
                debug!(%leader, timer = %timer.id(), "urgent bounce cancelled");
                timer.cancel();
                true
            }
            None => false,
        }
    }

    /// A member's urgency hint changed.
    pub fn urgency_changed(&mut self, window: WindowId, urgent: bool) -> Option<BounceOutcome> {
        let leader = *self.windows.get(&window)?;
        let focused = self.focused;
        let app = self.apps.get_mut(&leader)?;

        if urgent {
            if focused == Some(window) || app.urgent_windows.contains(&window) {
                return None;
            }
            app.urgent_windows.push(window);
            if app.urgent_bounce_timer.is_some() {
                return None;
            }
            Some(self.bounce_while_urgent(leader))
        } else {
            app.urgent_windows.retain(|w| *w != window);
            if app.urgent_windows.is_empty() {
                self.cancel_urgent_bounce(leader);
            }
            None
        }
    }

    /// Route an urgent-bounce timer fire. Fires from a replaced or
    /// cancelled arming, or for a destroyed application, are ignored.
    pub fn on_timer(&mut self, fire: TimerFire) -> Option<BounceOutcome> {
        let TimerKind::UrgentBounce(leader) = fire.kind else {
            return None;
        };
        let current = self.apps.get(&leader)?.urgent_timer_id();
        if current != Some(fire.id) {
            trace!(%leader, timer = %fire.id, "stale urgent bounce fire");
            return None;
        }
        Some(self.bounce(leader))
    }
}
