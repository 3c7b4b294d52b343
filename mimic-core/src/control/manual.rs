//! Manual joint control
//!
//! Targets are set per joint (or for all alpha / all beta joints at once)
//! and approached by the animator; each animation tick yields one command
//! with the apply bit set.

use heapless::Vec;

use crate::command::{apply_angles, AngleChannel, AngleCommand, CommandError};
use crate::config::AnimationConfig;
use crate::link::{CommandLink, LinkError, SendOutcome};
use crate::motion::AngleAnimator;
use crate::traits::Transport;

/// Joints addressed by a manual command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JointSelection {
    /// Both alpha rotary joints
    AllAlpha,
    /// All four beta gimbals
    AllBeta,
    /// One joint
    One(AngleChannel),
}

impl JointSelection {
    /// Channels covered by this selection
    pub fn channels(self) -> Vec<AngleChannel, 4> {
        let mut channels = Vec::new();
        let source: &[AngleChannel] = match &self {
            JointSelection::AllAlpha => &AngleChannel::ALPHA,
            JointSelection::AllBeta => &AngleChannel::BETA,
            JointSelection::One(channel) => core::slice::from_ref(channel),
        };
        // At most four channels per selection
        let _ = channels.extend_from_slice(source);
        channels
    }
}

/// Manual controller state
#[derive(Debug, Clone, Default)]
pub struct ManualControl {
    animator: AngleAnimator,
    animating: bool,
}

impl ManualControl {
    /// Controller resting at the home position
    pub fn new(animation: &AnimationConfig) -> Self {
        Self {
            animator: AngleAnimator::with_rate(animation.step_deg, animation.interval_ms),
            animating: false,
        }
    }

    /// Set a new target for the selected joints
    ///
    /// The angle is checked strictly; a rejected angle changes nothing.
    pub fn set_target(&mut self, selection: JointSelection, degrees: f32) -> Result<(), CommandError> {
        let channels = selection.channels();
        let mut command = AngleCommand::new();
        for channel in &channels {
            command = command.with(*channel, degrees);
        }
        command.validate()?;

        self.animator.set_targets(&command);
        self.animating = true;
        debug!("Manual target {:?} -> {}", selection, degrees);
        Ok(())
    }

    /// Send the selected joints back to their rest positions
    pub fn reset(&mut self, selection: JointSelection) {
        for channel in selection.channels() {
            self.animator.set_target(channel, channel.home_deg());
        }
        self.animating = true;
    }

    /// Move the selected joints to rest immediately, without animation
    pub fn jump_home(&mut self, selection: JointSelection) {
        let mut home = AngleCommand::new();
        for channel in selection.channels() {
            home = home.with(channel, channel.home_deg());
        }
        self.animator.jump_to(&home);
        self.animating = !self.animator.is_settled();
    }

    /// Target of one joint
    pub fn target(&self, channel: AngleChannel) -> f32 {
        self.animator.target(channel)
    }

    /// Current animated angles
    pub fn current(&self) -> AngleCommand {
        self.animator.current()
    }

    /// Whether an animation is in progress
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Advance the animation by elapsed time
    ///
    /// Returns the command to transmit for this tick, if one is due. The
    /// tick that settles the animation still yields its command.
    pub fn tick(&mut self, delta_ms: u32) -> Option<AngleCommand> {
        if !self.animating {
            return None;
        }
        let step = self.animator.update(delta_ms)?;
        if step.settled {
            self.animating = false;
        }
        Some(step.command)
    }

    /// Advance the animation and transmit any command due
    pub fn drive<T: Transport>(
        &mut self,
        link: &mut CommandLink<T>,
        delta_ms: u32,
    ) -> Result<Option<SendOutcome>, LinkError<T::Error>> {
        match self.tick(delta_ms) {
            Some(command) => link.send(&command, apply_angles(), &[]).map(Some),
            None => Ok(None),
        }
    }

    /// Transmit the current angles immediately
    pub fn send_all<T: Transport>(
        &self,
        link: &mut CommandLink<T>,
    ) -> Result<SendOutcome, LinkError<T::Error>> {
        link.send(&self.current(), apply_angles(), &[])
    }
}
