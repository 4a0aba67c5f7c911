//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use revu_config::{ConfigError, RevuConfig};

#[test]
fn loads_review_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[review]
assignment_due_days = 5
audit_page_size = 50

[database]
path = "/var/lib/revu/review.db"
"#,
        )?;

        let config: RevuConfig = Figment::from(Serialized::defaults(RevuConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.review.assignment_due_days, 5);
        assert_eq!(config.review.audit_page_size, 50);
        assert_eq!(config.review.max_cycle_upsert_attempts, 3);
        assert_eq!(config.database.path, "/var/lib/revu/review.db");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[review]\naudit_page_size = 50\n")?;
        jail.set_env("REVU_REVIEW__AUDIT_PAGE_SIZE", "7");
        jail.set_env("REVU_GENERAL__LOG_LEVEL", "debug");

        let config: RevuConfig = Figment::from(Serialized::defaults(RevuConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("REVU_").split("__"))
            .extract()?;

        assert_eq!(config.review.audit_page_size, 7);
        assert_eq!(config.general.log_level, "debug");
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".revu")).map_err(|e| e.to_string())?;
        jail.create_file(".revu/config.toml", "[database]\npath = \":memory:\"\n")?;

        let config = RevuConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn zero_due_days_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("REVU_REVIEW__ASSIGNMENT_DUE_DAYS", "0");

        let err = RevuConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_value_surfaces_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("REVU_REVIEW__AUDIT_PAGE_SIZE", "lots");

        let err = RevuConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
