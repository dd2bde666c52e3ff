use crate::controls::ClassToggle;

pub const TOGGLE_MARKER_CLASS: &str = "toggle-icon";
pub const CHEVRON_DOWN_CLASS: &str = "bi-chevron-down";
pub const CHEVRON_UP_CLASS: &str = "bi-chevron-up";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Chevron {
    #[default]
    Down,
    Up,
}

impl Chevron {
    pub fn class(self) -> &'static str {
        match self {
            Self::Down => CHEVRON_DOWN_CLASS,
            Self::Up => CHEVRON_UP_CLASS,
        }
    }

    #[cfg(test)]
    fn toggled(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }
}

/// Flips the icon between pointing down and pointing up.
///
/// Both chevron classes are toggled, so an icon that starts with exactly one of
/// them always ends with exactly the other. Returns the state after the flip,
/// or `None` when the control has no icon.
pub fn toggle_icon<C: ClassToggle + ?Sized>(icon: Option<&C>) -> Option<Chevron> {
    let Some(icon) = icon else {
        log::warn!("Toggle control has no icon");
        return None;
    };
    icon.toggle_class(CHEVRON_DOWN_CLASS);
    if icon.toggle_class(CHEVRON_UP_CLASS) {
        Some(Chevron::Up)
    } else {
        Some(Chevron::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::BTreeSet};

    struct Icon(RefCell<BTreeSet<String>>);

    impl Icon {
        fn new(classes: &[&str]) -> Self {
            Self(RefCell::new(classes.iter().map(|c| c.to_string()).collect()))
        }
        fn has(&self, class: &str) -> bool {
            self.0.borrow().contains(class)
        }
    }

    impl ClassToggle for Icon {
        fn toggle_class(&self, class: &str) -> bool {
            let mut classes = self.0.borrow_mut();
            if classes.remove(class) {
                false
            } else {
                classes.insert(class.to_string());
                true
            }
        }
    }

    #[test]
    fn single_click_flips() {
        let icon = Icon::new(&["bi", CHEVRON_DOWN_CLASS]);
        assert_eq!(toggle_icon(Some(&icon)), Some(Chevron::Up));
        assert!(icon.has(CHEVRON_UP_CLASS));
        assert!(!icon.has(CHEVRON_DOWN_CLASS));
        assert!(icon.has("bi"));
    }

    #[test]
    fn click_parity() {
        for clicks in 0..7 {
            let icon = Icon::new(&["bi", CHEVRON_DOWN_CLASS]);
            let mut expected = Chevron::Down;
            for _ in 0..clicks {
                expected = expected.toggled();
                assert_eq!(toggle_icon(Some(&icon)), Some(expected));
            }
            let flipped = clicks % 2 == 1;
            assert_eq!(icon.has(CHEVRON_UP_CLASS), flipped);
            assert_eq!(icon.has(CHEVRON_DOWN_CLASS), !flipped);
        }
    }

    #[test]
    fn starts_from_declared_state() {
        let icon = Icon::new(&[CHEVRON_UP_CLASS]);
        assert_eq!(toggle_icon(Some(&icon)), Some(Chevron::Down));
        assert_eq!(toggle_icon(Some(&icon)), Some(Chevron::Up));
    }

    #[test]
    fn controls_are_independent() {
        let first = Icon::new(&[CHEVRON_DOWN_CLASS]);
        let second = Icon::new(&[CHEVRON_DOWN_CLASS]);
        toggle_icon(Some(&first));
        toggle_icon(Some(&first));
        toggle_icon(Some(&first));
        assert!(first.has(CHEVRON_UP_CLASS));
        assert!(second.has(CHEVRON_DOWN_CLASS));
        assert!(!second.has(CHEVRON_UP_CLASS));
    }

    #[test]
    fn missing_icon_is_noop() {
        assert_eq!(toggle_icon::<Icon>(None), None);
    }

    #[test]
    fn chevron_classes() {
        assert_eq!(Chevron::default().class(), CHEVRON_DOWN_CLASS);
        assert_eq!(Chevron::Down.toggled().class(), CHEVRON_UP_CLASS);
        assert_eq!(Chevron::Up.toggled().toggled(), Chevron::Up);
    }
}
