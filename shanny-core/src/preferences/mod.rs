//! Visitor preferences persisted in browser storage
//!
//! The storage itself is behind [`PreferenceStore`]; hosts back it with
//! `localStorage`, tests with [`InMemoryPreferenceStore`].

pub mod consent;
pub mod store;
pub mod theme;

pub use consent::{
    CONSENT_COOKIE_MAX_AGE_DAYS, CONSENT_KEY, CookieConsent, clear_consent_cookie,
    consent_cookie,
};
pub use store::{InMemoryPreferenceStore, PreferenceStore};
pub use theme::{COLOR_SCHEME_DARK_QUERY, THEME_KEY, ThemePreference};
