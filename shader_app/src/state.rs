//! Effect selection and key handling, independent of the window

use rust_media::graphics::Effect;
use rust_media::window::Key;

use crate::error::DemoError;

/// What the main loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// The label must be redrawn
    EffectChanged,
    Close,
}

pub struct DemoState {
    effects: Vec<Box<dyn Effect>>,
    current: usize,
}

impl DemoState {
    pub fn new(effects: Vec<Box<dyn Effect>>) -> Result<Self, DemoError> {
        if effects.is_empty() {
            return Err(DemoError::NoEffects);
        }
        Ok(Self { effects, current: 0 })
    }

    pub fn handle_key(&mut self, key: Key) -> Action {
        let count = self.effects.len();
        match key {
            Key::Escape => Action::Close,
            Key::Left => {
                self.current = (self.current + count - 1) % count;
                log::info!("Switched to {}", self.current().name());
                Action::EffectChanged
            }
            Key::Right => {
                self.current = (self.current + 1) % count;
                log::info!("Switched to {}", self.current().name());
                Action::EffectChanged
            }
            _ => Action::Continue,
        }
    }

    pub fn current(&self) -> &dyn Effect {
        self.effects[self.current].as_ref()
    }

    pub fn current_mut(&mut self) -> &mut dyn Effect {
        self.effects[self.current].as_mut()
    }

    pub fn label(&self) -> String {
        format!("Current effect: {}", self.current().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_media::graphics::{Color, FragmentInput};

    struct Named(&'static str);

    impl Effect for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn fragment(&self, input: &FragmentInput<'_>) -> Color {
            input.current()
        }
    }

    fn state() -> DemoState {
        DemoState::new(vec![Box::new(Named("One")), Box::new(Named("Two")), Box::new(Named("Three"))]).unwrap()
    }

    #[test]
    fn test_initial_label() {
        assert_eq!(state().label(), "Current effect: One");
    }

    #[test]
    fn test_right_wraps_around() {
        let mut state = state();
        for _ in 0..3 {
            assert_eq!(state.handle_key(Key::Right), Action::EffectChanged);
        }
        assert_eq!(state.label(), "Current effect: One");
    }

    #[test]
    fn test_left_wraps_to_last() {
        let mut state = state();
        state.handle_key(Key::Left);
        assert_eq!(state.label(), "Current effect: Three");
    }

    #[test]
    fn test_escape_closes_and_other_keys_are_ignored() {
        let mut state = state();
        assert_eq!(state.handle_key(Key::Space), Action::Continue);
        assert_eq!(state.handle_key(Key::Escape), Action::Close);
        assert_eq!(state.label(), "Current effect: One");
    }

    #[test]
    fn test_empty_effect_list_is_rejected() {
        assert!(matches!(DemoState::new(Vec::new()), Err(DemoError::NoEffects)));
    }
}
