//! Property-based tests for layered resolution.
//!
//! The unit tests in each module cover single assignments. This module checks
//! that the merge behaves as a per-field last-write-wins over arbitrary
//! layer contents.

use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;

use crate::sources::{EnvironmentSource, ParsedArguments};
use crate::{ModuleIdentifier, Namespace, OptionParser, ResolveOptions};

crate::namespace! {
    #[derive(Debug, Clone, PartialEq)]
    struct Layered {
        timeout: i64,
        name: String,
    }
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,12}"
}

fn layer_strategy() -> impl Strategy<Value = (Option<i64>, Option<String>)> {
    (
        prop::option::of(-100_000i64..100_000),
        prop::option::of(name_strategy()),
    )
}

fn toml_for(timeout: Option<i64>, name: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(t) = timeout {
        out.push_str(&format!("timeout = {t}\n"));
    }
    if let Some(n) = name {
        out.push_str(&format!("name = \"{n}\"\n"));
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // A field present in the file always wins over the argument value
    #[test]
    fn file_overrides_args_per_field(
        (arg_timeout, arg_name) in layer_strategy(),
        (file_timeout, file_name) in layer_strategy(),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layered.toml");
        fs::write(&path, toml_for(file_timeout, file_name.as_deref())).unwrap();

        let base = Layered { timeout: arg_timeout, name: arg_name.clone() };
        let parser = OptionParser::with_arguments(
            ModuleIdentifier::try_from("layered").unwrap(),
            ParsedArguments::new(base),
        )
        .with_default_config_path(&path);

        let ns = parser.resolve(&ResolveOptions::new().skip_env()).unwrap();
        prop_assert_eq!(ns.timeout, file_timeout.or(arg_timeout));
        prop_assert_eq!(ns.name, file_name.or(arg_name));
    }

    // Environment strings applied last win over any earlier typed value
    #[test]
    fn env_overrides_earlier_layers(
        (base_timeout, base_name) in layer_strategy(),
        (env_timeout, env_name) in layer_strategy(),
    ) {
        let id = ModuleIdentifier::try_from("layered").unwrap();
        let mut vars = Vec::new();
        if let Some(t) = env_timeout {
            vars.push(("LAYERED_TIMEOUT".to_string(), t.to_string()));
        }
        if let Some(n) = &env_name {
            vars.push(("LAYERED_NAME".to_string(), n.clone()));
        }

        let mapping = EnvironmentSource::new(&id).read_from(vars).unwrap();
        let mut ns = Layered { timeout: base_timeout, name: base_name.clone() };
        ns.set_all(mapping).unwrap();

        prop_assert_eq!(ns.timeout, env_timeout.or(base_timeout));
        prop_assert_eq!(ns.name, env_name.or(base_name));
    }

    // Applying the same mapping twice changes nothing
    #[test]
    fn set_all_is_idempotent((timeout, name) in layer_strategy()) {
        let mut once = Layered::default();
        let mut mapping = crate::RawMapping::new();
        if let Some(t) = timeout {
            mapping.insert("timeout".to_string(), t.to_string().into());
        }
        if let Some(n) = name {
            mapping.insert("name".to_string(), n.into());
        }

        once.set_all(mapping.clone()).unwrap();
        let mut twice = once.clone();
        twice.set_all(mapping).unwrap();
        prop_assert_eq!(once, twice);
    }
}
