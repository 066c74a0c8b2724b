//! Shared test helpers for configuration tests.

use std::ffi::OsString;

use ortho_config::{MergeComposer, OrthoConfig};
use serde_json::Value;

use crate::PrDigestConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose a [`PrDigestConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> PrDigestConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    PrDigestConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Environment values visible while loading configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvOverrides<'a> {
    /// Value for `PRDIGEST_PR`, or `None` to unset it.
    pub pr: Option<&'a str>,
    /// Value for `PRDIGEST_MAX_PAGES`, or `None` to unset it.
    pub max_pages: Option<&'a str>,
}

/// Loads configuration from CLI arguments with an isolated home directory
/// and the given environment values.
pub fn load_with(env: EnvOverrides<'_>, cli_args: &[&str]) -> PrDigestConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let _guard = env_lock::lock_env([
        ("PRDIGEST_PR", env.pr),
        ("PRDIGEST_MAX_PAGES", env.max_pages),
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ]);

    let mut args: Vec<OsString> = vec![OsString::from("prdigest")];
    args.extend(cli_args.iter().map(OsString::from));

    PrDigestConfig::load_from_iter(args).expect("config should load")
}
