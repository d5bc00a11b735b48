use super::*;

#[test]
fn test_default_timeouts() {
    let t = Timeouts::default();
    assert_eq!(t.app_shell, Duration::from_secs(60));
    assert_eq!(t.per_candidate, Duration::from_secs(5));
    assert!(t.per_candidate < t.default);
    assert!(t.first_result < t.contact_label);
}

#[test]
fn test_default_config_targets_whatsapp() {
    let config = SessionConfig::default();
    assert_eq!(config.target_url, "https://web.whatsapp.com/");
    assert_eq!(config.browser, BrowserType::Chrome);
    assert!(config.maximized);
    assert!(!config.headless);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_urls() {
    let config = SessionConfig {
        target_url: "not a url".to_string(),
        ..SessionConfig::default()
    };
    assert!(config.validate().is_err());

    let config = SessionConfig {
        target_url: "ftp://example.com".to_string(),
        ..SessionConfig::default()
    };
    assert!(config.validate().is_err());

    let config = SessionConfig {
        webdriver_url: Some("::".to_string()),
        ..SessionConfig::default()
    };
    assert!(config.validate().is_err());
}
