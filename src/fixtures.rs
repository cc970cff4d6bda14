#[cfg(test)]
pub mod test {
    use crate::Unmarshal;
    use crate::driver::Driver;
    use crate::drivers::MapDriver;
    use crate::error::DriverError;

    /// A static driver named `"test"`.
    pub fn map(pairs: &[(&str, &str)]) -> MapDriver {
        MapDriver::from_pairs("test", pairs.iter().copied())
    }

    /// The values used by the accessor tests.
    pub fn fig_values() -> MapDriver {
        map(&[("A", "a"), ("B", "true"), ("C", "3"), ("F", "1.13")])
    }

    /// Fails every lookup, like a backing store that cannot be read.
    pub struct FailingDriver;

    impl Driver for FailingDriver {
        fn get(&self, _key: &str) -> Result<Option<String>, DriverError> {
            Err(DriverError::Other("backend unavailable".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[derive(Unmarshal, Debug, Default, PartialEq)]
    pub struct OptionalFixture {
        #[fig(key = "optional_string")]
        pub optional_string: String,
        #[fig(key = "optional_int")]
        pub optional_int: i32,
        #[fig(key = "optional_int64")]
        pub optional_int64: i64,
        #[fig(key = "optional_bool")]
        pub optional_bool: bool,
        #[fig(key = "optional_float")]
        pub optional_float: f64,
        #[fig(key = "optional_string")]
        pub optional_string_opt: Option<String>,
        #[fig(key = "optional_int")]
        pub optional_int_opt: Option<i32>,
        #[fig(key = "optional_int64")]
        pub optional_int64_opt: Option<i64>,
        #[fig(key = "optional_bool")]
        pub optional_bool_opt: Option<bool>,
        #[fig(key = "optional_float")]
        pub optional_float_opt: Option<f64>,
    }

    #[derive(Unmarshal, Debug, Default, PartialEq)]
    pub struct RequiredFixture {
        #[fig(key = "string", required)]
        pub required_string: String,
        #[fig(key = "int", required)]
        pub required_int: i32,
        #[fig(key = "int64", required)]
        pub required_int64: i64,
        #[fig(key = "bool", required)]
        pub required_bool: bool,
        #[fig(key = "float", required)]
        pub required_float: f64,
    }

    #[derive(Unmarshal, Debug, Default, PartialEq)]
    pub struct MixedFixture {
        #[fig(key = "optional_string")]
        pub optional_string: String,
        #[fig(key = "optional_int")]
        pub optional_int: i32,
        #[fig(key = "optional_int64")]
        pub optional_int64: i64,
        #[fig(key = "optional_bool")]
        pub optional_bool: bool,
        #[fig(key = "optional_float")]
        pub optional_float: f64,
        #[fig(key = "optional_string")]
        pub optional_string_opt: Option<String>,
        #[fig(key = "optional_int")]
        pub optional_int_opt: Option<i32>,
        #[fig(key = "optional_int64")]
        pub optional_int64_opt: Option<i64>,
        #[fig(key = "optional_bool")]
        pub optional_bool_opt: Option<bool>,
        #[fig(key = "optional_float")]
        pub optional_float_opt: Option<f64>,

        #[fig(key = "string", required = "true")]
        pub required_string: String,
        #[fig(key = "int", required = "true")]
        pub required_int: i32,
        #[fig(key = "int64", required = "true")]
        pub required_int64: i64,
        #[fig(key = "bool", required = "true")]
        pub required_bool: bool,
        #[fig(key = "float", required = "true")]
        pub required_float: f64,
        #[fig(key = "string", required = "true")]
        pub required_string_opt: Option<String>,
        #[fig(key = "int", required = "true")]
        pub required_int_opt: Option<i32>,
        #[fig(key = "int64", required = "true")]
        pub required_int64_opt: Option<i64>,
        #[fig(key = "bool", required = "true")]
        pub required_bool_opt: Option<bool>,
        #[fig(key = "float", required = "true")]
        pub required_float_opt: Option<f64>,
    }

    #[derive(Unmarshal, Debug, Default, PartialEq)]
    pub struct DefaultsFixture {
        #[fig(key = "optional_string", default = "foo")]
        pub optional_string: String,
        #[fig(key = "required_string", required, default = "bar")]
        pub required_string: String,
        #[fig(key = "port", default = 8080)]
        pub port: Option<i32>,
    }

    #[derive(Unmarshal, Debug, Default, PartialEq)]
    pub struct UnsupportedFixture {
        #[fig(key = "hosts")]
        pub hosts: Vec<String>,
        #[fig(key = "name")]
        pub name: String,
    }

    #[derive(Unmarshal, Debug, Default, PartialEq)]
    pub struct PrivateFieldFixture {
        #[fig(key = "visible")]
        pub visible: String,
        #[fig(key = "hidden", required)]
        hidden: String,
    }

    impl PrivateFieldFixture {
        pub fn hidden(&self) -> &str {
            &self.hidden
        }
    }

    #[derive(Unmarshal, Debug, Default, PartialEq)]
    pub struct BadDefaultFixture {
        #[fig(key = "retries", default = "three")]
        pub retries: i32,
    }
}
