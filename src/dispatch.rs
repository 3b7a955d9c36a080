use crate::effect::Effect;

/// A key press, already peeled out of whatever the window system wraps
/// keys in. Only the characters and escape matter to us.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyPress {
	Char(char),
	Escape,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
	Toggle(Effect),
	Save,
	Quit,
	None,
}

/// Effect selectors toggle, `s` saves, `q` and escape quit. Everything
/// else is noise and maps to None.
pub fn dispatch(key: KeyPress) -> Action {
	match key {
		KeyPress::Escape | KeyPress::Char('q') => Action::Quit,
		KeyPress::Char('s') => Action::Save,
		KeyPress::Char(c) => match Effect::from_selector(c) {
			Some(effect) => Action::Toggle(effect),
			None => Action::None,
		},
	}
}
