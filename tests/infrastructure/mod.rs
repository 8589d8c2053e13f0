mod error_log_test;
mod tracing_config_test;
