use super::*;
use axum::http::HeaderValue;

fn headers_with_cookie(raw: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(raw).expect("header"));
    headers
}

#[test]
fn reads_token_among_other_cookies() {
    let headers = headers_with_cookie("theme=dark; crm_session=abc123; lang=en");
    assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
}

#[test]
fn missing_or_empty_cookie_is_no_session() {
    assert_eq!(session_token(&HeaderMap::new()), None);
    assert_eq!(session_token(&headers_with_cookie("crm_session=")), None);
    assert_eq!(session_token(&headers_with_cookie("crm_sessionx=abc")), None);
}

#[test]
fn built_cookie_parses_back_to_the_same_token() {
    let cookie = session_cookie("tok-_9", 3600, false);
    assert_eq!(
        cookie,
        "crm_session=tok-_9; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
    );

    let pair = cookie.split(';').next().expect("pair");
    assert_eq!(
        session_token(&headers_with_cookie(pair)).as_deref(),
        Some("tok-_9")
    );
}

#[test]
fn secure_flag_and_expiry() {
    assert!(session_cookie("t", 10, true).ends_with("; Secure"));
    let expired = expired_cookie(false);
    assert!(expired.starts_with("crm_session=;"));
    assert!(expired.contains("Max-Age=0"));
}

#[test]
fn protected_prefixes_match_whole_segments() {
    assert!(is_protected("/dashboard"));
    assert!(is_protected("/customers/C031"));
    assert!(is_protected("/tasks/events"));
    assert!(!is_protected("/customersx"));
    assert!(!is_protected("/login"));
    assert!(!is_protected("/api/me"));
    assert!(!is_protected("/healthz"));
}
