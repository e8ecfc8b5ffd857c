use telephone_log::{Config, Format, LoggerBuilder};

#[test]
fn invalid_filter_is_rejected_before_install() {
    let config = Config {
        level: "telephone=loud".to_owned(),
        ..Config::default()
    };

    let err = LoggerBuilder::from_config(config).build().unwrap_err();
    assert_eq!(err.code(), "LOG_FILTER");
    assert!(err.to_string().contains("telephone=loud"));
}

#[test]
fn directives_with_targets_parse() {
    let config = Config {
        level: "warn,telephone_migrate=debug".to_owned(),
        format: Format::Json,
        ansi: false,
    };
    assert!(LoggerBuilder::from_config(config).filter().is_ok());
}

#[test]
fn second_install_fails() {
    let first = LoggerBuilder::from_config(Config::default()).build();
    let second = LoggerBuilder::from_config(Config::ci()).build();

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err().code(), "LOG_INIT");
}
