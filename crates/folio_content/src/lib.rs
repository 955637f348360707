//! Folio Content
//!
//! Static page content and the small stateful pieces around it:
//!
//! - **Registry**: personal info, navigation, skills, education, projects
//!   and contact tables
//! - **Icons**: closed Lucide icon set
//! - **Theme**: light/dark preference, persisted through the preference store
//! - **Contact**: form validation and delivery through the EmailJS relay
//! - **Toasts**: transient notifications for contact outcomes

pub mod contact;
pub mod error;
pub mod icons;
pub mod registry;
pub mod theme;
pub mod toast;

#[cfg(feature = "http")]
pub use contact::HttpMailRelay;
pub use contact::{ContactController, ContactForm, MailRelay, RelayCredentials, SubmitOutcome};
pub use error::{ContentError, Result};
pub use icons::{to_svg, Icon};
pub use theme::{ColorScheme, ThemeController};
pub use toast::{Toast, ToastId, ToastKind, ToastQueue};
