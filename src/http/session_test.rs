use super::session::*;
use crate::constants::FALLBACK_SESSION_ID;
use axum::http::{HeaderMap, header};

fn authenticated_session(id_token: &str) -> Session {
    Session {
        is_authenticated: true,
        id_token: Some(id_token.to_string()),
        access_token: Some("access".to_string()),
        refresh_token: Some("refresh".to_string()),
        user_info: None,
    }
}

#[test]
fn test_store_get_put_delete() {
    let store = SessionStore::new();
    assert!(store.get("s1").is_none());
    assert!(store.is_empty());

    store.put("s1", authenticated_session("it-1"));
    assert_eq!(store.len(), 1);

    let session = store.get("s1").unwrap();
    assert!(session.is_authenticated);
    assert_eq!(session.id_token.as_deref(), Some("it-1"));

    store.delete("s1");
    assert!(store.get("s1").is_none());
    assert_eq!(store.len(), 0);
}

#[test]
fn test_put_replaces_existing_entry() {
    let store = SessionStore::new();
    store.put("s1", authenticated_session("old"));
    store.put("s1", authenticated_session("new"));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("s1").unwrap().id_token.as_deref(), Some("new"));
}

#[test]
fn test_delete_missing_id_is_noop() {
    let store = SessionStore::new();
    store.delete("never-existed");
    assert_eq!(store.len(), 0);
}

#[test]
fn test_resolve_prefers_cookie() {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        "theme=dark; sessionId=cookie-id; lang=en".parse().unwrap(),
    );
    headers.insert(header::AUTHORIZATION, "header-id".parse().unwrap());

    assert_eq!(resolve_session_id(&headers), "cookie-id");
}

#[test]
fn test_resolve_falls_back_to_authorization_header() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, "Bearer some-token".parse().unwrap());

    // The raw header value doubles as the session key.
    assert_eq!(resolve_session_id(&headers), "Bearer some-token");
}

#[test]
fn test_resolve_falls_back_to_default() {
    let headers = HeaderMap::new();
    assert_eq!(resolve_session_id(&headers), FALLBACK_SESSION_ID);
}

#[test]
fn test_resolve_ignores_other_cookies() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, "sessionIdX=nope; other=1".parse().unwrap());

    assert_eq!(resolve_session_id(&headers), FALLBACK_SESSION_ID);
}

#[test]
fn test_cookie_strings() {
    let set = set_session_cookie("abc123");
    assert_eq!(set, "sessionId=abc123; Path=/; Max-Age=86400; HttpOnly");

    let clear = clear_session_cookie();
    assert_eq!(clear, "sessionId=; Path=/; Max-Age=0; HttpOnly");
}

#[test]
fn test_generated_ids_are_long_and_unique() {
    let a = generate_session_id();
    let b = generate_session_id();

    // 32 random bytes encode to 43 base64-url characters.
    assert_eq!(a.len(), 43);
    assert_ne!(a, b);
    assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}
