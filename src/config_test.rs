use super::*;

// Env vars are process-global; serialize these tests with a lock instead of
// relying on --test-threads=1.
static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// # Safety
/// Caller must hold `ENV_LOCK`.
unsafe fn clear_client_env() {
    unsafe {
        std::env::remove_var(BASE_URL_VAR);
        std::env::remove_var(REQUEST_TIMEOUT_VAR);
        std::env::remove_var(CONNECT_TIMEOUT_VAR);
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe { clear_client_env() };

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.request_timeout_secs, None);
    assert_eq!(cfg.connect_timeout_secs, None);
}

#[test]
fn from_env_overrides_and_trims_trailing_slash() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_client_env();
        std::env::set_var(BASE_URL_VAR, "http://localhost:8000/");
        std::env::set_var(REQUEST_TIMEOUT_VAR, "30");
        std::env::set_var(CONNECT_TIMEOUT_VAR, "5");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, "http://localhost:8000");
    assert_eq!(cfg.request_timeout_secs, Some(30));
    assert_eq!(cfg.connect_timeout_secs, Some(5));

    unsafe { clear_client_env() };
}

#[test]
fn from_env_ignores_unparseable_timeouts() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_client_env();
        std::env::set_var(REQUEST_TIMEOUT_VAR, "soon");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.request_timeout_secs, None);

    unsafe { clear_client_env() };
}

#[test]
fn new_normalizes_base_url() {
    let cfg = ClientConfig::new("https://api.example.test///");
    assert_eq!(cfg.base_url, "https://api.example.test");
}

#[test]
fn with_base_url_keeps_timeouts() {
    let cfg = ClientConfig {
        base_url: DEFAULT_BASE_URL.to_string(),
        request_timeout_secs: Some(10),
        connect_timeout_secs: Some(2),
    }
    .with_base_url("http://127.0.0.1:9000/");
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
    assert_eq!(cfg.request_timeout_secs, Some(10));
    assert_eq!(cfg.connect_timeout_secs, Some(2));
}
