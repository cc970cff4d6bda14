use chainfig::{ChainfigError, MapDriver, Resolver, Unmarshal};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Unmarshal, Debug, Default)]
pub struct ServerConfig {
    #[fig(key = "HOST", default = "127.0.0.1")]
    pub host: String,
    #[fig(key = "PORT", required)]
    pub port: i32,
    #[fig(key = "MAX_BODY")]
    pub max_body: Option<i64>,
    #[fig(key = "TLS", default = "F")]
    pub tls: bool,
    #[fig(key = "RATIO")]
    pub ratio: Option<f64>,
    pub not_bound: String,
}

#[derive(Unmarshal, Debug, Default)]
pub struct WithDefaults {
    #[fig(key = "optional_string", default = "foo")]
    pub optional_string: String,
    #[fig(key = "required_string", required = "true", default = "bar")]
    pub required_string: String,
}

#[derive(Unmarshal, Debug, Default)]
pub struct RequiredOnly {
    #[fig(key = "string", required = "True")]
    pub required_string: String,
}

#[derive(Unmarshal, Debug, Default)]
pub struct Calibration {
    #[fig(key = "OFFSET", default = -1)]
    pub offset: i32,
    #[fig(key = "TILT", default = -0.5)]
    pub tilt: Option<f64>,
}

#[derive(Unmarshal, Debug, Default)]
pub struct Generic<T: Default> {
    #[fig(key = "name")]
    pub name: String,
    pub extra: T,
}

#[test]
fn required_field_with_default_uses_default() {
    init_tracing();
    let resolver = Resolver::builder().driver(MapDriver::new("empty")).build();
    let mut config = WithDefaults::default();
    resolver.unmarshal(&mut config).unwrap();
    assert_eq!(config.required_string, "bar");
    assert_eq!(config.optional_string, "foo");
}

#[test]
fn required_field_without_default_fails() {
    init_tracing();
    let resolver = Resolver::builder().driver(MapDriver::new("empty")).build();
    let mut config = RequiredOnly::default();
    let err = resolver.unmarshal(&mut config).unwrap_err();
    assert!(matches!(
        err,
        ChainfigError::MissingRequired {
            field: "required_string",
            key: "string"
        }
    ));
}

#[test]
fn binds_all_supported_kinds() {
    init_tracing();
    let resolver = Resolver::builder()
        .map([
            ("PORT", "8443"),
            ("MAX_BODY", "10485760"),
            ("TLS", "true"),
            ("RATIO", "0.25"),
        ])
        .build();
    let mut config = ServerConfig::default();
    chainfig::unmarshal(&resolver, &mut config).unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8443);
    assert_eq!(config.max_body, Some(10_485_760));
    assert!(config.tls);
    assert_eq!(config.ratio, Some(0.25));
    assert_eq!(config.not_bound, "");
}

#[test]
fn absent_optionals_stay_none() {
    let resolver = Resolver::builder().map([("PORT", "80")]).build();
    let mut config = ServerConfig::default();
    resolver.unmarshal(&mut config).unwrap();
    assert_eq!(config.max_body, None);
    assert_eq!(config.ratio, None);
    assert!(!config.tls);
}

#[test]
fn first_driver_wins_when_binding() {
    let resolver = Resolver::builder()
        .driver(MapDriver::from_pairs("override", [("PORT", "9000")]))
        .driver(MapDriver::from_pairs("base", [("PORT", "80"), ("HOST", "base")]))
        .build();
    let mut config = ServerConfig::default();
    resolver.unmarshal(&mut config).unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.host, "base");
}

#[test]
fn wrong_type_carries_key_value_and_type() {
    let resolver = Resolver::builder().map([("PORT", "eighty")]).build();
    let mut config = ServerConfig::default();
    let err = resolver.unmarshal(&mut config).unwrap_err();
    let ChainfigError::Field { field, source, .. } = err else {
        panic!("Expected Field error");
    };
    assert_eq!(field, "port");
    match *source {
        ChainfigError::WrongType {
            key,
            value,
            expected,
        } => {
            assert_eq!(key, "PORT");
            assert_eq!(value, "eighty");
            assert_eq!(expected, "int");
        }
        other => panic!("Expected WrongType, got: {other:?}"),
    }
}

#[test]
fn negative_literal_defaults_apply() {
    let resolver = Resolver::builder().driver(MapDriver::new("empty")).build();
    let mut config = Calibration::default();
    resolver.unmarshal(&mut config).unwrap();
    assert_eq!(config.offset, -1);
    assert_eq!(config.tilt, Some(-0.5));
}

#[test]
fn generic_struct_binds() {
    let resolver = Resolver::builder().map([("name", "svc")]).build();
    let mut config = Generic::<u8>::default();
    resolver.unmarshal(&mut config).unwrap();
    assert_eq!(config.name, "svc");
    assert_eq!(Generic::<u8>::fields().len(), 1);
}

#[test]
fn report_shows_origins() {
    let resolver = Resolver::builder()
        .driver(MapDriver::from_pairs("cli", [("PORT", "1")]))
        .build();
    let report = resolver.report::<ServerConfig>().unwrap();
    let text = report.to_string();
    assert!(text.contains("PORT = <set>  # from cli"));
    assert!(text.contains("HOST = <default>"));
    assert!(text.contains("MAX_BODY = <not set>"));
    assert_eq!(report.missing().count(), 0);
}
