mod error_display;
mod loading_spinner;
mod verdict_display;
mod verify_form;

pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use verdict_display::VerdictDisplay;
pub use verify_form::VerifyForm;
