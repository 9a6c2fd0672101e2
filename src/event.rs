use std::fmt;

use sdl2::{event::Event, keyboard::Keycode, EventPump};

/// The fixed set of inputs the frame loop reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Quit,
    Start,
    Select,
    Up,
    Down,
    Left,
    Right,
    Fire1,
    Fire2,
}

impl Button {
    pub fn from_keycode(keycode: Keycode) -> Option<Self> {
        let button = match keycode {
            Keycode::Escape => Button::Quit,
            Keycode::Return => Button::Start,
            Keycode::Backspace => Button::Select,
            Keycode::Up => Button::Up,
            Keycode::Down => Button::Down,
            Keycode::Left => Button::Left,
            Keycode::Right => Button::Right,
            Keycode::Space => Button::Fire1,
            Keycode::LCtrl => Button::Fire2,
            _ => return None,
        };

        Some(button)
    }

    /// Auto-repeated key downs are dropped so a held key reports once.
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Quit { .. } => Some(Button::Quit),
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => Self::from_keycode(*keycode),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Quit => "QUIT",
            Button::Start => "START",
            Button::Select => "SELECT",
            Button::Up => "UP",
            Button::Down => "DOWN",
            Button::Left => "LEFT",
            Button::Right => "RIGHT",
            Button::Fire1 => "FIRE1",
            Button::Fire2 => "FIRE2",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Consumes events up to and including the first mapped one; the rest stay
/// in `events`.
pub fn first_button<I: Iterator<Item = Event>>(events: &mut I) -> Option<Button> {
    events.find_map(|event| Button::from_event(&event))
}

pub fn poll_button(events: &mut EventPump) -> Option<Button> {
    first_button(&mut events.poll_iter())
}

#[cfg(test)]
mod test {
    use sdl2::keyboard::{Mod, Scancode};

    use super::*;

    fn key_down(keycode: Keycode, repeat: bool) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: None::<Scancode>,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    #[test]
    fn mapped_keys() {
        let table = [
            (Keycode::Escape, "QUIT"),
            (Keycode::Return, "START"),
            (Keycode::Backspace, "SELECT"),
            (Keycode::Up, "UP"),
            (Keycode::Down, "DOWN"),
            (Keycode::Left, "LEFT"),
            (Keycode::Right, "RIGHT"),
            (Keycode::Space, "FIRE1"),
            (Keycode::LCtrl, "FIRE2"),
        ];

        for &(keycode, label) in table.iter() {
            let button = Button::from_event(&key_down(keycode, false));
            assert_eq!(Some(label), button.map(Button::label), "{:?}", keycode);
        }
    }

    #[test]
    fn unmapped_keys_yield_nothing() {
        for &keycode in [Keycode::A, Keycode::RCtrl, Keycode::Tab, Keycode::F1].iter() {
            assert_eq!(None, Button::from_event(&key_down(keycode, false)));
        }
    }

    #[test]
    fn key_repeat_is_ignored() {
        assert_eq!(None, Button::from_event(&key_down(Keycode::Space, true)));
    }

    #[test]
    fn key_up_is_ignored() {
        let event = Event::KeyUp {
            timestamp: 0,
            window_id: 1,
            keycode: Some(Keycode::Escape),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        };

        assert_eq!(None, Button::from_event(&event));
    }

    #[test]
    fn window_close_quits() {
        assert_eq!(Some(Button::Quit), Button::from_event(&Event::Quit { timestamp: 0 }));
    }

    #[test]
    fn first_button_leaves_the_rest_queued() {
        let mut events = vec![
            key_down(Keycode::A, false),
            key_down(Keycode::Up, false),
            key_down(Keycode::Down, false),
        ]
        .into_iter();

        assert_eq!(Some(Button::Up), first_button(&mut events));

        let rest: Vec<Event> = events.collect();
        assert_eq!(1, rest.len());
        assert_eq!(Some(Button::Down), Button::from_event(&rest[0]));
    }

    #[test]
    fn first_button_without_mapped_events() {
        assert_eq!(None, first_button(&mut Vec::<Event>::new().into_iter()));

        let mut events = vec![key_down(Keycode::A, false), key_down(Keycode::Space, true)].into_iter();
        assert_eq!(None, first_button(&mut events));
        assert_eq!(0, events.len());
    }

    #[test]
    fn display_is_label() {
        assert_eq!("FIRE2", Button::Fire2.to_string());
    }
}
