//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lift_config::LiftConfig;

#[test]
fn loads_connection_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[source]
base_url = "https://plan.example.com/api"
token = "source-token"

[target]
base_url = "https://sheets.example.com/api"
token = "target-token"
reference_workspace_id = 9001

[limits]
max_attempts = 6
calls_per_minute = 100

[general]
hours_per_day = 7.5
"#,
        )?;

        let config: LiftConfig = Figment::from(Serialized::defaults(LiftConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.source.base_url, "https://plan.example.com/api");
        assert_eq!(config.source.token, "source-token");
        assert!(config.source.is_configured());
        assert_eq!(config.target.reference_workspace_id, Some(9001));
        assert_eq!(config.limits.max_attempts, 6);
        assert_eq!(config.limits.calls_per_minute, 100);
        // Unset limit fields keep their defaults.
        assert_eq!(config.limits.max_delay_ms, 30_000);
        assert!((config.general.hours_per_day - 7.5).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn env_vars_override_toml_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[target]
base_url = "https://sheets.example.com/api"
token = "from-toml"
"#,
        )?;
        jail.set_env("PLANLIFT_TARGET__TOKEN", "from-env");

        let config: LiftConfig = Figment::from(Serialized::defaults(LiftConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PLANLIFT_").split("__"))
            .extract()?;

        assert_eq!(config.target.token, "from-env");
        assert_eq!(config.target.base_url, "https://sheets.example.com/api");
        Ok(())
    });
}

#[test]
fn figment_builds_without_files() {
    Jail::expect_with(|_jail| {
        let config: LiftConfig = LiftConfig::figment().extract()?;
        assert!(!config.source.is_configured());
        assert!(!config.target.is_configured());
        Ok(())
    });
}
