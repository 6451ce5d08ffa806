use super::*;

fn test_client(base_url: &str) -> ProviderClient {
    ProviderClient::with_base_url(
        Credentials {
            username: "analyst".to_owned(),
            password: "hunter2".to_owned(),
        },
        SessionCache::new(std::env::temp_dir().join("postlens-client-unit.json")),
        30,
        "postlens-test/0.1",
        base_url,
    )
    .expect("client construction should not fail")
}

#[test]
fn build_url_appends_segments_under_base_path() {
    let client = test_client("https://i.instagram.com/api/");
    let url = client.build_url(&["users", "natgeo", "usernameinfo"], &[]);
    assert_eq!(
        url.as_str(),
        "https://i.instagram.com/api/users/natgeo/usernameinfo/"
    );
}

#[test]
fn build_url_handles_base_without_trailing_slash() {
    let client = test_client("https://i.instagram.com/api");
    let url = client.build_url(&["feed", "user", "42"], &[("count", "25")]);
    assert_eq!(
        url.as_str(),
        "https://i.instagram.com/api/feed/user/42/?count=25"
    );
}

#[test]
fn build_url_at_host_root() {
    let client = test_client("http://127.0.0.1:8080");
    let url = client.build_url(&["accounts", "login"], &[]);
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/accounts/login/");
}

#[test]
fn build_url_encodes_path_segments() {
    let client = test_client("https://i.instagram.com/api/");
    let url = client.build_url(&["users", "a/b c", "usernameinfo"], &[]);
    assert!(
        url.as_str().contains("a%2Fb%20c"),
        "segment should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = ProviderClient::with_base_url(
        Credentials {
            username: "a".to_owned(),
            password: "b".to_owned(),
        },
        SessionCache::new("unused.json"),
        30,
        "postlens-test/0.1",
        "not a url",
    );
    assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
}

#[test]
fn check_api_error_maps_login_required_to_forbidden() {
    let body = serde_json::json!({"status": "fail", "message": "login_required"});
    let err = ProviderClient::check_api_error(&body, "users/1/info").unwrap_err();
    assert!(err.is_forbidden());
}

#[test]
fn check_api_error_passes_ok_status() {
    let body = serde_json::json!({"status": "ok"});
    assert!(ProviderClient::check_api_error(&body, "x").is_ok());
}

#[test]
fn check_api_error_surfaces_fail_message() {
    let body = serde_json::json!({"status": "fail", "message": "user not available"});
    let err = ProviderClient::check_api_error(&body, "x").unwrap_err();
    assert!(matches!(err, ProviderError::Api(ref m) if m == "user not available"));
}

#[test]
fn credentials_debug_redacts_password() {
    let creds = Credentials {
        username: "analyst".to_owned(),
        password: "hunter2".to_owned(),
    };
    let rendered = format!("{creds:?}");
    assert!(!rendered.contains("hunter2"));
}
