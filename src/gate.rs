use std::time::{Duration, Instant};

use crate::classifier::Reading;
use crate::types::{Command, Zone};

/// Gate armed/disarmed state. Disarmed means a command has fired and the
/// thumb has not yet returned inside the inner band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmState {
    Armed,
    Disarmed,
}

/// Anti-chatter gate between zone classification and the serial link.
///
/// After any send the gate disarms; it re-arms only once the thumb passes
/// back near the palm centre (inside the inner band, tighter than merely
/// leaving the outer zone). Combined with the cooldown this stops tracking
/// jitter near a rail from toggling the servo.
#[derive(Debug)]
pub struct ChatterGate {
    state: ArmState,
    last_send: Option<Instant>,
    cooldown: Duration,
}

impl ChatterGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            state: ArmState::Armed,
            // None: the very first send is never cooldown-blocked
            last_send: None,
            cooldown,
        }
    }

    pub fn state(&self) -> ArmState {
        self.state
    }

    /// Advance the gate by one frame with a hand present. Returns the
    /// command to send, if one fires this frame.
    ///
    /// Re-arming is evaluated before the fire check, so a single frame can
    /// re-arm; it cannot re-arm and fire, since the inner band lies inside
    /// the neutral zone.
    pub fn update(&mut self, reading: &Reading, now: Instant) -> Option<Command> {
        if self.state == ArmState::Disarmed && reading.in_inner_band {
            self.state = ArmState::Armed;
        }

        if self.state != ArmState::Armed || !self.cooled_down(now) {
            return None;
        }

        let cmd = match reading.zone {
            Zone::Out => Command::Extend,
            Zone::In => Command::Retract,
            Zone::Neutral => return None,
        };

        self.last_send = Some(now);
        self.state = ArmState::Disarmed;
        Some(cmd)
    }

    /// Manual override (keyboard H/L): always fires, but joins the same
    /// cooldown and re-arm discipline as an automatic send.
    pub fn force(&mut self, now: Instant) {
        self.last_send = Some(now);
        self.state = ArmState::Disarmed;
    }

    fn cooled_down(&self, now: Instant) -> bool {
        match self.last_send {
            None => true,
            Some(t) => now.saturating_duration_since(t) >= self.cooldown,
        }
    }
}
