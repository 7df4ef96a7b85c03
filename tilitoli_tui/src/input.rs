//! Keyboard adapter: turns arrow keys into move intents on the bus.

use crossterm::event::KeyCode;
use tilitoli::{Event, EventBus};
use tracing::{instrument, trace};

/// The `(dx, dy)` hole displacement a key asks for.
///
/// An arrow names the way the tile travels, so the hole goes the other way:
/// pressing Left pulls the tile on the hole's right into it. `h j k l`
/// alias the arrows.
pub fn move_for_key(key: KeyCode) -> Option<(i32, i32)> {
    match key {
        KeyCode::Left | KeyCode::Char('h') => Some((1, 0)),
        KeyCode::Right | KeyCode::Char('l') => Some((-1, 0)),
        KeyCode::Up | KeyCode::Char('k') => Some((0, 1)),
        KeyCode::Down | KeyCode::Char('j') => Some((0, -1)),
        _ => None,
    }
}

/// Publishes a [`Event::MovePressed`] for every directional key.
///
/// The adapter does not know the board. Whether a move is legal is
/// decided by whoever handles the intent.
#[derive(Debug, Clone)]
pub struct KeyboardAdapter {
    bus: EventBus,
}

impl KeyboardAdapter {
    /// Creates an adapter publishing on `bus`.
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    /// Handles one key press; returns whether it was a directional key.
    #[instrument(skip(self))]
    pub fn handle_key(&self, key: KeyCode) -> bool {
        let Some((dx, dy)) = move_for_key(key) else {
            return false;
        };
        trace!(dx, dy, "Move pressed");
        self.bus.publish(Event::MovePressed { dx, dy });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tilitoli::ListenerError;

    #[test]
    fn test_arrow_mapping() {
        assert_eq!(move_for_key(KeyCode::Left), Some((1, 0)));
        assert_eq!(move_for_key(KeyCode::Right), Some((-1, 0)));
        assert_eq!(move_for_key(KeyCode::Up), Some((0, 1)));
        assert_eq!(move_for_key(KeyCode::Down), Some((0, -1)));
    }

    #[test]
    fn test_vim_keys_alias_arrows() {
        assert_eq!(move_for_key(KeyCode::Char('h')), move_for_key(KeyCode::Left));
        assert_eq!(move_for_key(KeyCode::Char('j')), move_for_key(KeyCode::Down));
        assert_eq!(move_for_key(KeyCode::Char('k')), move_for_key(KeyCode::Up));
        assert_eq!(move_for_key(KeyCode::Char('l')), move_for_key(KeyCode::Right));
    }

    #[test]
    fn test_handle_key_publishes_intent_only_for_directions() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        bus.subscribe(Rc::new(move |event: &Event| -> Result<(), ListenerError> {
            sink.borrow_mut().push(*event);
            Ok(())
        }));
        let adapter = KeyboardAdapter::new(bus);

        assert!(adapter.handle_key(KeyCode::Left));
        assert!(!adapter.handle_key(KeyCode::Char('x')));
        assert!(!adapter.handle_key(KeyCode::Enter));

        assert_eq!(*log.borrow(), vec![Event::MovePressed { dx: 1, dy: 0 }]);
    }
}
