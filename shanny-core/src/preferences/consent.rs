use chrono::{DateTime, Duration, Utc};
use shanny_model::ConsentDecision;

use super::store::PreferenceStore;

/// Used both as the cookie name and the local storage key.
pub const CONSENT_KEY: &str = "shanny_consent";
pub const CONSENT_COOKIE_MAX_AGE_DAYS: i64 = 365;

const COOKIE_ATTRIBUTES: &str = "path=/; SameSite=Lax; Secure";

/// Cookie-consent state for one visitor.
///
/// The decision is mirrored into local storage and a cookie; reads prefer
/// local storage.
#[derive(Debug, Clone, Copy)]
pub struct CookieConsent;

impl CookieConsent {
    /// Current decision, from local storage, then the `Cookie` header.
    pub fn read(
        store: &dyn PreferenceStore,
        cookie_header: Option<&str>,
    ) -> Option<ConsentDecision> {
        store
            .get(CONSENT_KEY)
            .and_then(|raw| raw.parse::<ConsentDecision>().ok())
            .or_else(|| {
                cookie_header
                    .and_then(|header| cookie_value(header, CONSENT_KEY))
                    .and_then(|raw| raw.parse::<ConsentDecision>().ok())
            })
    }

    /// Whether the consent prompt should be shown.
    pub fn needs_prompt(store: &dyn PreferenceStore, cookie_header: Option<&str>) -> bool {
        Self::read(store, cookie_header).is_none()
    }

    /// Stores `decision` and returns the cookie string to set.
    pub fn record(
        store: &dyn PreferenceStore,
        decision: ConsentDecision,
        now: DateTime<Utc>,
    ) -> String {
        store.set(CONSENT_KEY, decision.as_str());
        consent_cookie(decision, now)
    }

    /// Forgets the decision and returns the cookie string that deletes it.
    pub fn clear(store: &dyn PreferenceStore) -> String {
        store.remove(CONSENT_KEY);
        clear_consent_cookie()
    }
}

pub fn consent_cookie(decision: ConsentDecision, now: DateTime<Utc>) -> String {
    let expires = now + Duration::days(CONSENT_COOKIE_MAX_AGE_DAYS);
    format!(
        "{CONSENT_KEY}={}; expires={}; {COOKIE_ATTRIBUTES}",
        decision.as_str(),
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

pub fn clear_consent_cookie() -> String {
    format!("{CONSENT_KEY}=; Max-Age=0; {COOKIE_ATTRIBUTES}")
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::preferences::InMemoryPreferenceStore;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn cookie_expires_after_a_year() {
        assert_eq!(
            consent_cookie(ConsentDecision::Accepted, noon()),
            "shanny_consent=accepted; expires=Sun, 01 Mar 2026 12:00:00 GMT; path=/; SameSite=Lax; Secure"
        );
    }

    #[test]
    fn local_storage_wins_over_cookie() {
        let store = InMemoryPreferenceStore::new();
        store.set(CONSENT_KEY, "declined");
        assert_eq!(
            CookieConsent::read(&store, Some("shanny_consent=accepted")),
            Some(ConsentDecision::Declined)
        );
    }

    #[test]
    fn cookie_is_used_when_storage_is_empty() {
        let store = InMemoryPreferenceStore::new();
        let header = "theme=dark; shanny_consent=accepted; other=1";
        assert_eq!(
            CookieConsent::read(&store, Some(header)),
            Some(ConsentDecision::Accepted)
        );
        assert!(CookieConsent::needs_prompt(&store, Some("shanny_consent=maybe")));
        assert!(CookieConsent::needs_prompt(&store, None));
    }

    #[test]
    fn record_and_clear_round_trip_through_storage() {
        let store = InMemoryPreferenceStore::new();
        let cookie = CookieConsent::record(&store, ConsentDecision::Declined, noon());
        assert!(cookie.starts_with("shanny_consent=declined;"));
        assert!(!CookieConsent::needs_prompt(&store, None));

        let deletion = CookieConsent::clear(&store);
        assert_eq!(deletion, "shanny_consent=; Max-Age=0; path=/; SameSite=Lax; Secure");
        assert!(CookieConsent::needs_prompt(&store, None));
    }
}
