use super::*;

fn valid() -> Settings {
    Settings::new(
        "postgresql://app:secret@db:5432/app",
        Path::new("migrations"),
        Duration::from_secs(2),
        None,
        None,
    )
    .unwrap()
}

#[test]
fn test_defaults_are_unbounded() {
    let settings = valid();
    assert_eq!(settings.probe_interval, Duration::from_secs(2));
    assert!(settings.max_attempts.is_none());
    assert!(settings.max_wait.is_none());
}

#[test]
fn test_rejects_empty_url() {
    let err = Settings::new(
        "",
        Path::new("migrations"),
        Duration::from_secs(2),
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidSetting { .. }));
}

#[test]
fn test_rejects_zero_interval() {
    let err = Settings::new(
        "postgresql://db/app",
        Path::new("migrations"),
        Duration::ZERO,
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidSetting { .. }));
}

#[test]
fn test_rejects_zero_max_attempts() {
    let err = Settings::new(
        "postgresql://db/app",
        Path::new("migrations"),
        Duration::from_secs(2),
        Some(0),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidSetting { .. }));
}

#[test]
fn test_normalizes_sqlalchemy_style_url() {
    assert_eq!(
        normalize_database_url("postgresql+asyncpg://app:secret@db:5432/app"),
        "postgresql://app:secret@db:5432/app"
    );
    assert_eq!(
        normalize_database_url("postgresql+psycopg://db/app"),
        "postgresql://db/app"
    );
}

#[test]
fn test_plain_url_is_unchanged() {
    assert_eq!(
        normalize_database_url("postgres://app@db/app"),
        "postgres://app@db/app"
    );
    assert_eq!(normalize_database_url("not a url"), "not a url");
}

#[test]
fn test_settings_normalize_url() {
    let settings = Settings::new(
        "postgresql+asyncpg://db/app",
        Path::new("migrations"),
        Duration::from_secs(2),
        Some(10),
        Some(Duration::from_secs(60)),
    )
    .unwrap();
    assert_eq!(settings.database_url, "postgresql://db/app");
    assert_eq!(settings.max_attempts, Some(10));
    assert_eq!(settings.max_wait, Some(Duration::from_secs(60)));
}
