// Session cookie envelope
// Decision: Issuance and removal share one builder
// Browsers only drop a cookie whose name, path and flags match the one they hold

use axum_extra::extract::cookie::{Cookie, SameSite};

use super::config::CookieConfig;

fn base_cookie(config: &CookieConfig, value: String) -> Cookie<'static> {
    Cookie::build((config.name.clone(), value))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .build()
}

/// Cookie carrying a freshly issued credential
pub fn session_cookie(config: &CookieConfig, token: String, max_age_secs: i64) -> Cookie<'static> {
    let mut cookie = base_cookie(config, token);
    cookie.set_max_age(time::Duration::seconds(max_age_secs));
    cookie
}

/// Cookie instructing the browser to discard the credential
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(config, String::new());
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie(&CookieConfig::new(false), "abc".to_string(), 604_800);

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604_800)));
    }

    #[test]
    fn test_production_cookie_is_secure() {
        let cookie = session_cookie(&CookieConfig::new(true), "abc".to_string(), 60);
        assert_eq!(cookie.secure(), Some(true));
        assert!(cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_matches_session_flags() {
        for secure in [false, true] {
            let config = CookieConfig::new(secure);
            let issued = session_cookie(&config, "abc".to_string(), 60);
            let removal = removal_cookie(&config);

            assert_eq!(removal.name(), issued.name());
            assert_eq!(removal.path(), issued.path());
            assert_eq!(removal.http_only(), issued.http_only());
            assert_eq!(removal.secure(), issued.secure());
            assert_eq!(removal.same_site(), issued.same_site());

            assert_eq!(removal.value(), "");
            assert_eq!(removal.max_age(), Some(time::Duration::ZERO));
        }
    }
}
