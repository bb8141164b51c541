use chat_us::config::AppConfig;
use serial_test::serial;
use std::env;
use std::io::Write;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("API_URL");
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("CONFIG_FILE");
        env::remove_var("CHAT_SERVER__PORT");
        env::remove_var("CHAT_API__BASE_URL");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["chat-us", "--api-url", "http://localhost:8000"])
        .expect("Failed to load config");

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.server.address(), "127.0.0.1:3000");
}

#[test]
#[serial]
fn test_missing_api_url_is_rejected() {
    clear_env_vars();

    assert!(AppConfig::load_from_args(["chat-us"]).is_err());
}

#[test]
#[serial]
fn test_invalid_api_url_is_rejected() {
    clear_env_vars();

    let err = AppConfig::load_from_args(["chat-us", "--api-url", "localhost"]).unwrap_err();
    assert!(err.to_string().contains("api.base_url"));
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_SERVER__PORT", "9090");
        env::set_var("CHAT_API__BASE_URL", "http://qa.internal:8000");
    }

    let config = AppConfig::load_from_args(["chat-us"]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.api.base_url, "http://qa.internal:8000");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_env_vars() {
    clear_env_vars();
    unsafe {
        env::set_var("API_URL", "http://from-env:8000");
        env::set_var("PORT", "4000");
    }

    let config = AppConfig::load_from_args(["chat-us"]).expect("Failed to load config");
    assert_eq!(config.api.base_url, "http://from-env:8000");
    assert_eq!(config.server.port, 4000);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_flag_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args([
        "chat-us",
        "--api-url",
        "http://localhost:8000",
        "--port",
        "8080",
        "--host",
        "0.0.0.0",
    ])
    .expect("Failed to load config");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    write!(
        file,
        r#"
server:
  port: 7070
  max_upload_bytes: 1024
api:
  base_url: "https://qa.example.com/v1"
"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let config = AppConfig::load_from_args(["chat-us", "--config", path.as_str()])
        .expect("Failed to load config from file");

    assert_eq!(config.server.port, 7070);
    assert_eq!(config.server.max_upload_bytes, 1024);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.api.base_url, "https://qa.example.com/v1");
}
