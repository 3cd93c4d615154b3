//! Input boundary
//!
//! The simulation never reads a keyboard. A platform layer implements
//! [`InputProvider`] and the frame driver polls it once per tick into a
//! [`TickInput`] snapshot.

/// Every control the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    Quit,
    Restart,
    Dump,
    MuteToggle,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::RotateLeft,
        Control::RotateRight,
        Control::Thrust,
        Control::Fire,
        Control::Quit,
        Control::Restart,
        Control::Dump,
        Control::MuteToggle,
    ];
}

/// "Is control X currently held" capability
pub trait InputProvider {
    fn is_held(&self, control: Control) -> bool;
}

/// Controls held during a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Self-destruct the ship
    pub quit: bool,
    /// Start a new session after game over
    pub restart: bool,
    /// Request a diagnostic dump
    pub dump: bool,
    pub mute_toggle: bool,
    /// Let the autopilot fly the ship
    pub autopilot: bool,
}

impl TickInput {
    /// Snapshot every control from a provider
    pub fn poll(provider: &impl InputProvider) -> Self {
        Self {
            rotate_left: provider.is_held(Control::RotateLeft),
            rotate_right: provider.is_held(Control::RotateRight),
            thrust: provider.is_held(Control::Thrust),
            fire: provider.is_held(Control::Fire),
            quit: provider.is_held(Control::Quit),
            restart: provider.is_held(Control::Restart),
            dump: provider.is_held(Control::Dump),
            mute_toggle: provider.is_held(Control::MuteToggle),
            autopilot: false,
        }
    }

    /// Flight controls only, session controls cleared
    pub fn flight_controls(&self) -> Self {
        Self {
            rotate_left: self.rotate_left,
            rotate_right: self.rotate_right,
            thrust: self.thrust,
            fire: self.fire,
            quit: self.quit,
            ..Default::default()
        }
    }
}

impl InputProvider for TickInput {
    fn is_held(&self, control: Control) -> bool {
        match control {
            Control::RotateLeft => self.rotate_left,
            Control::RotateRight => self.rotate_right,
            Control::Thrust => self.thrust,
            Control::Fire => self.fire,
            Control::Quit => self.quit,
            Control::Restart => self.restart,
            Control::Dump => self.dump,
            Control::MuteToggle => self.mute_toggle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Held(HashSet<Control>);

    impl InputProvider for Held {
        fn is_held(&self, control: Control) -> bool {
            self.0.contains(&control)
        }
    }

    #[test]
    fn test_poll_reads_every_control() {
        let provider = Held([Control::Thrust, Control::Fire, Control::Dump].into());
        let input = TickInput::poll(&provider);
        assert!(input.thrust && input.fire && input.dump);
        assert!(!input.rotate_left && !input.quit && !input.autopilot);

        for control in Control::ALL {
            assert_eq!(input.is_held(control), provider.is_held(control));
        }
    }

    #[test]
    fn test_flight_controls_drop_session_controls() {
        let input = TickInput {
            fire: true,
            restart: true,
            dump: true,
            ..Default::default()
        };
        let flight = input.flight_controls();
        assert!(flight.fire);
        assert!(!flight.restart && !flight.dump);
    }
}
