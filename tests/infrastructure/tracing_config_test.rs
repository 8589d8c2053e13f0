use paycheck_sanity::infrastructure::observability::TracingConfig;
use paycheck_sanity::presentation::Environment;

#[test]
fn given_logging_values_when_building_config_then_level_and_format_carry_over() {
    let config = TracingConfig::new(Environment::Prod.as_str(), "warn", true);

    assert!(config.json_format);
    assert_eq!(config.environment, "prod");
    assert_eq!(config.filter, "warn,paycheck_sanity=debug,tower_http=debug");
}

#[test]
fn given_json_log_format_when_enable_json_is_off_then_json_output_is_selected() {
    let config = TracingConfig::new("local", "info", false).with_log_format(Some("JSON"));

    assert!(config.json_format);
}

#[test]
fn given_other_or_missing_log_format_when_applied_then_setting_is_kept() {
    let base = TracingConfig {
        environment: "local".to_string(),
        json_format: false,
        filter: "info".to_string(),
    };

    assert!(!base.clone().with_log_format(None).json_format);
    assert!(!base.clone().with_log_format(Some("pretty")).json_format);
}

#[test]
fn given_log_format_env_var_when_building_config_then_json_output_is_selected() {
    // SAFETY: the environment is only accessed through std in this binary, and
    // the other LOG_FORMAT readers here expect JSON output either way.
    unsafe { std::env::set_var("LOG_FORMAT", "json") };

    let config = TracingConfig::new("local", "info", false);

    unsafe { std::env::remove_var("LOG_FORMAT") };
    assert!(config.json_format);
}

#[test]
fn given_environment_names_when_parsing_then_aliases_are_accepted() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("local".to_string()),
        Ok(Environment::Local)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}
