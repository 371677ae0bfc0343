//! Swap domain - amount input, two-sided synchronization and validation

pub mod amount_synchronizer;
pub mod form_validator;
pub mod input_sanitizer;

pub use amount_synchronizer::SwapFormState;
pub use form_validator::{FormField, FormValidator, ValidationErrors};
pub use input_sanitizer::{parse_positive_amount, sanitize};
