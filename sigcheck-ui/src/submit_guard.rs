//! Submit-time guard for the verification form.
//!
//! On submission the loading spinner is revealed and the submit button
//! is disabled, so a second click cannot fire while the post is in
//! flight. The guard is advisory: it never cancels the event's default
//! action, and the native form post proceeds untouched. There is no
//! transition back to idle; the navigation that follows submission
//! resets the page.

use std::cell::Cell;
use std::fmt;

pub const FORM_ID: &str = "verifyForm";
pub const SPINNER_ID: &str = "loadingSpinner";
pub const SUBMIT_BUTTON_ID: &str = "submitBtn";

/// An element whose presence in the visible layout can be toggled.
pub trait SpinnerHandle {
    fn set_visible(&self, visible: bool);
}

/// An interactive control whose disabled marker can be toggled.
pub trait SubmitControlHandle {
    fn set_disabled(&self, disabled: bool);
}

/// Resolves elements by identifier, however the hosting page stores
/// them. Lets the guard run against a real page or a test double.
pub trait ElementLookup {
    type Element: SpinnerHandle + SubmitControlHandle;

    fn by_id(&self, id: &str) -> Option<Self::Element>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    MissingElement(&'static str),
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(id) => write!(f, "required element '{}' not found", id),
        }
    }
}

impl std::error::Error for GuardError {}

#[derive(Debug)]
pub struct SubmitGuard<S, B> {
    spinner: S,
    button: B,
    phase: Cell<SubmitPhase>,
}

impl<S: SpinnerHandle, B: SubmitControlHandle> SubmitGuard<S, B> {
    /// Takes the spinner and submit-control handles and establishes the
    /// idle state: spinner hidden, button enabled.
    pub fn new(spinner: S, button: B) -> Self {
        spinner.set_visible(false);
        button.set_disabled(false);
        Self {
            spinner,
            button,
            phase: Cell::new(SubmitPhase::Idle),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase.get()
    }

    /// Handles one submission event. Reveals the spinner and disables
    /// the button; idempotent, since a re-dispatched submit event lands
    /// in the same terminal state.
    pub fn on_submit(&self) {
        self.spinner.set_visible(true);
        self.button.set_disabled(true);
        self.phase.set(SubmitPhase::Submitting);
    }
}

impl<E: SpinnerHandle + SubmitControlHandle> SubmitGuard<E, E> {
    /// Resolves the form, spinner, and submit button by their fixed
    /// identifiers. Fails loudly on the first missing element rather
    /// than deferring the fault to the point of use.
    pub fn bind<L: ElementLookup<Element = E>>(lookup: &L) -> Result<Self, GuardError> {
        lookup
            .by_id(FORM_ID)
            .ok_or(GuardError::MissingElement(FORM_ID))?;
        let spinner = lookup
            .by_id(SPINNER_ID)
            .ok_or(GuardError::MissingElement(SPINNER_ID))?;
        let button = lookup
            .by_id(SUBMIT_BUTTON_ID)
            .ok_or(GuardError::MissingElement(SUBMIT_BUTTON_ID))?;
        Ok(Self::new(spinner, button))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct FakeElement {
        visible: Cell<bool>,
        disabled: Cell<bool>,
    }

    impl SpinnerHandle for Rc<FakeElement> {
        fn set_visible(&self, visible: bool) {
            self.visible.set(visible);
        }
    }

    impl SubmitControlHandle for Rc<FakeElement> {
        fn set_disabled(&self, disabled: bool) {
            self.disabled.set(disabled);
        }
    }

    struct FakePage {
        elements: HashMap<&'static str, Rc<FakeElement>>,
    }

    impl FakePage {
        fn with_required_elements() -> Self {
            let mut elements = HashMap::new();
            for id in [FORM_ID, SPINNER_ID, SUBMIT_BUTTON_ID] {
                elements.insert(id, Rc::new(FakeElement::default()));
            }
            Self { elements }
        }

        fn without(mut self, id: &str) -> Self {
            self.elements.remove(id);
            self
        }

        fn element(&self, id: &str) -> Rc<FakeElement> {
            Rc::clone(&self.elements[id])
        }
    }

    impl ElementLookup for FakePage {
        type Element = Rc<FakeElement>;

        fn by_id(&self, id: &str) -> Option<Self::Element> {
            self.elements.get(id).cloned()
        }
    }

    struct FakeSubmitEvent {
        default_prevented: bool,
    }

    #[test]
    fn test_bind_establishes_idle_state() {
        let page = FakePage::with_required_elements();
        // Markup could ship with the spinner showing; binding must hide it.
        page.element(SPINNER_ID).visible.set(true);
        page.element(SUBMIT_BUTTON_ID).disabled.set(true);

        let guard = SubmitGuard::bind(&page).unwrap();

        assert_eq!(guard.phase(), SubmitPhase::Idle);
        assert!(!page.element(SPINNER_ID).visible.get());
        assert!(!page.element(SUBMIT_BUTTON_ID).disabled.get());
    }

    #[test]
    fn test_submit_reveals_spinner_and_disables_button() {
        let page = FakePage::with_required_elements();
        let guard = SubmitGuard::bind(&page).unwrap();

        guard.on_submit();

        assert_eq!(guard.phase(), SubmitPhase::Submitting);
        assert!(page.element(SPINNER_ID).visible.get());
        assert!(page.element(SUBMIT_BUTTON_ID).disabled.get());
    }

    #[test]
    fn test_submit_never_cancels_default_action() {
        let page = FakePage::with_required_elements();
        let guard = SubmitGuard::bind(&page).unwrap();

        let event = FakeSubmitEvent {
            default_prevented: false,
        };
        guard.on_submit();

        assert!(!event.default_prevented);
    }

    #[test]
    fn test_repeat_submissions_are_idempotent() {
        let page = FakePage::with_required_elements();
        let guard = SubmitGuard::bind(&page).unwrap();

        guard.on_submit();
        guard.on_submit();

        assert_eq!(guard.phase(), SubmitPhase::Submitting);
        assert!(page.element(SPINNER_ID).visible.get());
        assert!(page.element(SUBMIT_BUTTON_ID).disabled.get());
    }

    #[test]
    fn test_bind_fails_loudly_on_missing_elements() {
        let missing_spinner = FakePage::with_required_elements().without(SPINNER_ID);
        assert_eq!(
            SubmitGuard::bind(&missing_spinner).unwrap_err(),
            GuardError::MissingElement(SPINNER_ID)
        );

        let missing_form = FakePage::with_required_elements().without(FORM_ID);
        assert_eq!(
            SubmitGuard::bind(&missing_form).unwrap_err(),
            GuardError::MissingElement(FORM_ID)
        );
    }
}
