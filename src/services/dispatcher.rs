// Aura keymap dispatch
// Single entry point the UI calls on every key press: normalize the event,
// check the global enable switch, then look the shortcut up in the keymap.

use crate::managers::keybinding_manager::KeybindingManagerTrait;
use crate::platform::Platform;
use crate::services::key_normalizer::KeyNormalizer;
use crate::types::action::Action;
use crate::types::key_event::RawKeyEvent;
use crate::types::keymap::DispatchOutcome;

/// Resolves raw key events to actions. Holds no state beyond the platform.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    normalizer: KeyNormalizer,
}

impl Dispatcher {
    pub fn new(platform: Platform) -> Self {
        Self {
            normalizer: KeyNormalizer::new(platform),
        }
    }

    pub fn normalizer(&self) -> &KeyNormalizer {
        &self.normalizer
    }

    /// Resolves `event` against `keymap`.
    ///
    /// `Handled` means the caller should run the action and suppress the
    /// event's default behavior.
    pub fn dispatch<M>(&self, keymap: &M, event: &RawKeyEvent) -> DispatchOutcome
    where
        M: KeybindingManagerTrait + ?Sized,
    {
        let Some(shortcut) = self.normalizer.normalize(event) else {
            return DispatchOutcome::Unhandled;
        };

        if !keymap.is_enabled() {
            log::trace!("Shortcuts disabled, ignoring '{}'", shortcut);
            return DispatchOutcome::Unhandled;
        }

        match keymap.resolve(&shortcut) {
            Some(action) => {
                log::debug!("'{}' -> '{}'", shortcut, action);
                DispatchOutcome::Handled(action)
            }
            None => DispatchOutcome::Unhandled,
        }
    }

    /// Like [`Dispatcher::dispatch`], invoking `handler` when an action resolves.
    pub fn dispatch_with<M, F>(&self, keymap: &M, event: &RawKeyEvent, handler: F) -> DispatchOutcome
    where
        M: KeybindingManagerTrait + ?Sized,
        F: FnOnce(Action),
    {
        let outcome = self.dispatch(keymap, event);
        if let DispatchOutcome::Handled(action) = outcome {
            handler(action);
        }
        outcome
    }
}
