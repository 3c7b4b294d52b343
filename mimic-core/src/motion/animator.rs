//! Angle animator for stepwise target tracking
//!
//! Every tick each channel moves at most `step_deg` toward its target. A
//! channel within [`SNAP_THRESHOLD_DEG`] of its target snaps onto it. One
//! packet is meant to be sent per tick.

use mimic_protocol::ANGLE_COUNT;

use crate::command::{AngleChannel, AngleCommand};

/// Default movement per tick in degrees
pub const DEFAULT_STEP_DEG: f32 = 2.0;

/// Default tick interval in milliseconds (20 ticks per second)
pub const DEFAULT_INTERVAL_MS: u32 = 50;

/// Remaining distance below which a channel snaps to its target
pub const SNAP_THRESHOLD_DEG: f32 = 0.5;

fn abs(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// Result of one animation tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationStep {
    /// Angles after this tick
    pub command: AngleCommand,
    /// No channel had to move during this tick
    pub settled: bool,
}

/// Stepwise animator for all six channels
#[derive(Debug, Clone)]
pub struct AngleAnimator {
    current: [f32; ANGLE_COUNT],
    target: [f32; ANGLE_COUNT],
    step_deg: f32,
    interval_ms: u32,
    /// Time accumulated toward the next tick
    elapsed_ms: u32,
}

impl Default for AngleAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleAnimator {
    /// Create an animator resting at the home position with default rate
    pub fn new() -> Self {
        Self::with_rate(DEFAULT_STEP_DEG, DEFAULT_INTERVAL_MS)
    }

    /// Create an animator with a custom step size and tick interval
    ///
    /// A zero interval is raised to 1 ms; a non-positive step falls back to
    /// the default.
    pub fn with_rate(step_deg: f32, interval_ms: u32) -> Self {
        let home = AngleChannel::ALL.map(AngleChannel::home_deg);
        Self {
            current: home,
            target: home,
            step_deg: if step_deg > 0.0 { step_deg } else { DEFAULT_STEP_DEG },
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Set the target of one channel
    pub fn set_target(&mut self, channel: AngleChannel, degrees: f32) {
        if degrees.is_finite() {
            self.target[channel.slot()] = degrees;
        }
    }

    /// Set targets for every channel the command defines
    pub fn set_targets(&mut self, command: &AngleCommand) {
        for (channel, angle) in command.iter() {
            if let Some(degrees) = angle {
                self.set_target(channel, degrees);
            }
        }
    }

    /// Move channels immediately, without animation
    pub fn jump_to(&mut self, command: &AngleCommand) {
        for (channel, angle) in command.iter() {
            if let Some(degrees) = angle.filter(|d| d.is_finite()) {
                self.current[channel.slot()] = degrees;
                self.target[channel.slot()] = degrees;
            }
        }
    }

    /// Target of one channel
    pub fn target(&self, channel: AngleChannel) -> f32 {
        self.target[channel.slot()]
    }

    /// Current angles of every channel
    pub fn current(&self) -> AngleCommand {
        AngleCommand::from_degrees(self.current)
    }

    /// Check if every channel sits on its target
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advance every channel by one tick
    pub fn step(&mut self) -> AnimationStep {
        let mut settled = true;

        for slot in 0..ANGLE_COUNT {
            let diff = self.target[slot] - self.current[slot];
            if abs(diff) > SNAP_THRESHOLD_DEG {
                settled = false;
                let magnitude = abs(diff).min(self.step_deg);
                self.current[slot] += if diff < 0.0 { -magnitude } else { magnitude };
            } else {
                self.current[slot] = self.target[slot];
            }
        }

        AnimationStep {
            command: self.current(),
            settled,
        }
    }

    /// Advance by elapsed time
    ///
    /// Runs at most one tick per call. Time beyond one interval carries over,
    /// so a late caller catches up one tick per call without skipping any.
    /// Returns `None` when no interval has completed.
    pub fn update(&mut self, delta_ms: u32) -> Option<AnimationStep> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms < self.interval_ms {
            return None;
        }

        self.elapsed_ms -= self.interval_ms;
        let step = self.step();
        if step.settled {
            self.elapsed_ms = 0;
        }
        Some(step)
    }

    /// Number of ticks until every channel is on target
    pub fn ticks_to_target(&self) -> u32 {
        let mut ticks = 0u32;
        for slot in 0..ANGLE_COUNT {
            let distance = abs(self.target[slot] - self.current[slot]);
            if distance > SNAP_THRESHOLD_DEG {
                // Partial last step, then one tick to snap if it lands short
                let full = (distance / self.step_deg) as u32;
                let remainder = distance - full as f32 * self.step_deg;
                let steps = if remainder > 0.0 { full + 1 } else { full };
                ticks = ticks.max(steps);
            }
        }
        ticks
    }

    /// Time until every channel is on target, in milliseconds
    pub fn time_to_target_ms(&self) -> u32 {
        self.ticks_to_target().saturating_mul(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_home() {
        let animator = AngleAnimator::new();
        assert!(animator.is_settled());
        assert_eq!(animator.current(), AngleCommand::home());
    }

    #[test]
    fn test_steps_toward_target() {
        let mut animator = AngleAnimator::new();
        animator.set_target(AngleChannel::Group1Alpha, 5.0);

        let step = animator.step();
        assert!(!step.settled);
        assert_eq!(step.command.get(AngleChannel::Group1Alpha), Some(2.0));

        animator.step();
        let step = animator.step();
        assert_eq!(step.command.get(AngleChannel::Group1Alpha), Some(5.0));
        assert!(!step.settled);

        let step = animator.step();
        assert!(step.settled);
        assert!(animator.is_settled());
    }

    #[test]
    fn test_moves_downward() {
        let mut animator = AngleAnimator::new();
        animator.set_target(AngleChannel::Panel1Beta, 87.0);

        let step = animator.step();
        assert_eq!(step.command.get(AngleChannel::Panel1Beta), Some(88.0));
        let step = animator.step();
        assert_eq!(step.command.get(AngleChannel::Panel1Beta), Some(87.0));
    }

    #[test]
    fn test_small_difference_snaps() {
        let mut animator = AngleAnimator::new();
        animator.set_target(AngleChannel::Panel2Beta, 90.4);

        let step = animator.step();
        assert!(step.settled);
        assert_eq!(step.command.get(AngleChannel::Panel2Beta), Some(90.4));
    }

    #[test]
    fn test_other_channels_untouched() {
        let mut animator = AngleAnimator::new();
        animator.set_target(AngleChannel::Group2Alpha, 100.0);
        let step = animator.step();
        assert_eq!(step.command.get(AngleChannel::Panel1Beta), Some(90.0));
        assert_eq!(step.command.get(AngleChannel::Group1Alpha), Some(0.0));
    }

    #[test]
    fn test_update_accumulates_time() {
        let mut animator = AngleAnimator::with_rate(2.0, 50);
        animator.set_target(AngleChannel::Group1Alpha, 20.0);

        assert!(animator.update(30).is_none());
        let step = animator.update(30).unwrap();
        assert_eq!(step.command.get(AngleChannel::Group1Alpha), Some(2.0));

        // 10ms carried over plus 140ms: three intervals owed, one tick now
        let step = animator.update(140).unwrap();
        assert_eq!(step.command.get(AngleChannel::Group1Alpha), Some(4.0));
        let step = animator.update(0).unwrap();
        assert_eq!(step.command.get(AngleChannel::Group1Alpha), Some(6.0));
        let step = animator.update(0).unwrap();
        assert_eq!(step.command.get(AngleChannel::Group1Alpha), Some(8.0));
        assert!(animator.update(0).is_none());
    }

    #[test]
    fn test_settling_drops_owed_time() {
        let mut animator = AngleAnimator::with_rate(2.0, 50);
        animator.set_target(AngleChannel::Panel1Beta, 91.0);

        let step = animator.update(500).unwrap();
        assert_eq!(step.command.get(AngleChannel::Panel1Beta), Some(91.0));
        assert!(animator.update(0).unwrap().settled);
        assert!(animator.update(0).is_none());
    }

    #[test]
    fn test_jump_to_skips_animation() {
        let mut animator = AngleAnimator::new();
        animator.jump_to(&AngleCommand::new().with(AngleChannel::Panel4Beta, 300.0));
        assert!(animator.is_settled());
        assert_eq!(animator.current().get(AngleChannel::Panel4Beta), Some(300.0));
    }

    #[test]
    fn test_non_finite_target_ignored() {
        let mut animator = AngleAnimator::new();
        animator.set_target(AngleChannel::Panel1Beta, f32::NAN);
        assert_eq!(animator.target(AngleChannel::Panel1Beta), 90.0);
    }

    #[test]
    fn test_time_to_target() {
        let mut animator = AngleAnimator::with_rate(2.0, 50);
        assert_eq!(animator.time_to_target_ms(), 0);

        animator.set_target(AngleChannel::Group1Alpha, 10.0);
        assert_eq!(animator.ticks_to_target(), 5);
        assert_eq!(animator.time_to_target_ms(), 250);

        animator.set_target(AngleChannel::Group2Alpha, 3.0);
        assert_eq!(animator.ticks_to_target(), 5);
    }
}
