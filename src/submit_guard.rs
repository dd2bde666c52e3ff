use crate::controls::{Cancelable, Disableable, Notifier, TextSource, Visibility};
use crate::domain::{is_valid_domain, trim_input};

pub const INVALID_DOMAIN_MESSAGE: &str = "Please enter a valid domain.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The browser goes on with the normal form submission.
    Proceed,
    Blocked,
}

/// Gates the analyze form on the domain pattern and shows submission progress.
pub struct SubmitGuard<'a, I: ?Sized, B: ?Sized, S: ?Sized, N: ?Sized> {
    input: &'a I,
    submit: &'a B,
    spinner: &'a S,
    notifier: &'a N,
}

impl<'a, I, B, S, N> SubmitGuard<'a, I, B, S, N>
where
    I: TextSource + ?Sized,
    B: Disableable + ?Sized,
    S: Visibility + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(input: &'a I, submit: &'a B, spinner: &'a S, notifier: &'a N) -> Self {
        Self {
            input,
            submit,
            spinner,
            notifier,
        }
    }

    pub fn on_submit<E: Cancelable + ?Sized>(&self, event: &E) -> Verdict {
        let value = self.input.value();
        let value = trim_input(&value);
        if !is_valid_domain(value) {
            log::info!("Blocked submission of invalid domain {:?}", value);
            self.notifier.notify(INVALID_DOMAIN_MESSAGE);
            event.prevent_default();
            self.submit.set_disabled(false);
            self.spinner.set_visible(false);
            return Verdict::Blocked;
        }
        log::debug!("Submitting {}", value);
        self.submit.set_disabled(true);
        self.spinner.set_visible(true);
        Verdict::Proceed
    }
}
