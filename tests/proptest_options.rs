// Property-based checks for setter validation, precedence and configure idempotence

use proptest::prelude::*;
use relational_options::{
    OptionsErrorKind, OptionsExtension, RawConfiguration, RelationalOptions,
    SqlServerOptionsExtension,
};

fn raw_options() -> impl Strategy<Value = RawConfiguration> {
    (
        proptest::option::of("[A-Za-z=;. ]{0,24}"),
        proptest::option::of(prop_oneof![(0..10_000i32).prop_map(|n| n.to_string()), "[a-z]{1,6}"]),
        proptest::option::of(prop_oneof![(1..10_000i32).prop_map(|n| n.to_string()), "[a-z]{1,6}"]),
    )
        .prop_map(|(connection_string, timeout, batch)| {
            let mut raw = RawConfiguration::new();
            if let Some(value) = connection_string {
                raw.insert("ConnectionString", value);
            }
            if let Some(value) = timeout {
                raw.insert("CommandTimeout", value);
            }
            if let Some(value) = batch {
                raw.insert("SqlServer:MaxBatchSize", value);
            }
            raw
        })
}

proptest! {
    #[test]
    fn connection_string_round_trips(value in ".*") {
        let mut options = RelationalOptions::new();
        options.set_connection_string(Some(value.as_str())).unwrap();
        prop_assert_eq!(options.connection_string(), Some(value.as_str()));
    }

    #[test]
    fn command_timeout_accepts_only_non_negative(value in any::<i32>()) {
        let mut options = RelationalOptions::new();
        let result = options.set_command_timeout(Some(value));
        if value >= 0 {
            prop_assert!(result.is_ok());
            prop_assert_eq!(options.command_timeout(), Some(value));
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), OptionsErrorKind::InvalidArgument);
            prop_assert_eq!(options.command_timeout(), None);
        }
    }

    #[test]
    fn max_batch_size_accepts_only_positive(value in any::<i32>()) {
        let mut options = SqlServerOptionsExtension::new();
        let result = options.set_max_batch_size(Some(value));
        if value > 0 {
            prop_assert!(result.is_ok());
            prop_assert_eq!(options.max_batch_size(), Some(value));
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), OptionsErrorKind::InvalidArgument);
            prop_assert_eq!(options.max_batch_size(), None);
        }
    }

    #[test]
    fn explicit_max_batch_size_wins(explicit in 1..i32::MAX, raw_value in any::<i32>()) {
        let raw: RawConfiguration = [("SqlServer:MaxBatchSize", raw_value.to_string())]
            .into_iter()
            .collect();
        let mut options = SqlServerOptionsExtension::new();
        options.set_max_batch_size(Some(explicit)).unwrap();

        options.configure(&raw).unwrap();

        prop_assert_eq!(options.max_batch_size(), Some(explicit));
    }

    #[test]
    fn configure_twice_matches_configure_once(raw in raw_options()) {
        let mut once = SqlServerOptionsExtension::new();
        let first = once.configure(&raw);

        let mut twice = SqlServerOptionsExtension::new();
        let _ = twice.configure(&raw);
        let second = twice.configure(&raw);

        prop_assert_eq!(first.is_ok(), second.is_ok());
        prop_assert_eq!(once.relational().connection_string(), twice.relational().connection_string());
        prop_assert_eq!(once.relational().command_timeout(), twice.relational().command_timeout());
        prop_assert_eq!(once.max_batch_size(), twice.max_batch_size());
    }
}
