//! `CMakeUserPresets.json` generation.
//!
//! Build and package presets are regenerated wholesale from the manifest and
//! merged into the existing document: `buildPresets` and `packagePresets`
//! are replaced, every other top-level key is kept as it was.

use crate::config::PresetsConfig;
use crate::error::{Result, ScaffoldError};
use crate::jsonio;
use crate::target::{BuildType, Target};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::Path;

pub const PRESETS_VERSION: u32 = 8;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildPreset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configure_preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackagePreset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configure_preset: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generators: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configurations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PackageOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_directory: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PackageOutput {
    pub debug: bool,
    pub verbose: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

const COMMON_BUILD: &str = "common-build";
const DEFAULT_PACKAGE: &str = "default-package";

/// The presets every document carries, with no target presets.
pub fn base_build_presets(config: &PresetsConfig) -> Vec<BuildPreset> {
    let mut presets = vec![BuildPreset {
        name: COMMON_BUILD.to_string(),
        configure_preset: Some(config.configure_preset.clone()),
        jobs: Some(config.jobs),
        hidden: true,
        ..Default::default()
    }];
    presets.extend(BuildType::ALL.iter().map(|bt| BuildPreset {
        name: bt.base_preset(),
        inherits: Some(COMMON_BUILD.to_string()),
        configuration: Some(bt.cmake_name().to_string()),
        hidden: true,
        ..Default::default()
    }));
    presets.push(BuildPreset {
        name: "docs-build".to_string(),
        configure_preset: Some(config.configure_preset.clone()),
        configuration: Some(BuildType::Release.cmake_name().to_string()),
        targets: vec!["docs".to_string()],
        ..Default::default()
    });
    presets
}

/// Base presets followed by one preset per target per build type.
pub fn build_presets(config: &PresetsConfig, targets: &[Target]) -> Vec<BuildPreset> {
    let mut presets = base_build_presets(config);
    for target in targets {
        let build_targets = target.build_targets();
        presets.extend(BuildType::ALL.iter().map(|&bt| BuildPreset {
            name: target.build_preset(bt),
            inherits: Some(bt.base_preset()),
            targets: build_targets.clone(),
            ..Default::default()
        }));
    }
    presets
}

pub fn base_package_preset(config: &PresetsConfig) -> PackagePreset {
    PackagePreset {
        name: DEFAULT_PACKAGE.to_string(),
        description: Some(DEFAULT_PACKAGE.to_string()),
        display_name: Some(DEFAULT_PACKAGE.to_string()),
        configure_preset: Some(config.configure_preset.clone()),
        generators: vec![config.package_generator.clone()],
        output: Some(PackageOutput::default()),
        package_directory: Some(config.package_directory.clone()),
        hidden: true,
        ..Default::default()
    }
}

/// The hidden default package preset and one package preset per target,
/// scoped to the target's release build.
pub fn package_presets(config: &PresetsConfig, targets: &[Target]) -> Vec<PackagePreset> {
    let mut presets = vec![base_package_preset(config)];
    presets.extend(targets.iter().map(|t| PackagePreset {
        name: t.package_preset(),
        inherits: Some(DEFAULT_PACKAGE.to_string()),
        configurations: vec![t.build_preset(BuildType::Release)],
        ..Default::default()
    }));
    presets
}

/// A complete `CMakeUserPresets.json` with no target presets.
pub fn baseline_document(config: &PresetsConfig) -> Value {
    let mut configure = Map::new();
    configure.insert("name".into(), json!(config.configure_preset));
    if !config.configure_inherits.is_empty() {
        configure.insert("inherits".into(), json!(config.configure_inherits));
    }
    configure.insert("generator".into(), json!(config.generator));
    let mut cache = Map::new();
    cache.insert(
        "CMAKE_TOOLCHAIN_FILE".into(),
        json!("$env{VCPKG_ROOT}/scripts/buildsystems/vcpkg.cmake"),
    );
    cache.insert("VCPKG_TARGET_TRIPLET".into(), json!(config.vcpkg_triplet));
    for (key, compiler) in [
        ("CMAKE_C_COMPILER", &config.c_compiler),
        ("CMAKE_CXX_COMPILER", &config.cxx_compiler),
    ] {
        if !compiler.is_empty() {
            cache.insert(key.into(), json!(compiler));
        }
    }
    configure.insert("cacheVariables".into(), Value::Object(cache));

    let test_presets: Vec<Value> = std::iter::once(json!({
        "name": "common-test",
        "configurePreset": config.configure_preset,
        "hidden": true,
        "output": {
            "outputLogFile": "test_output.log",
            "outputJUnitFile": "test_output.xml"
        }
    }))
    .chain(BuildType::ALL.iter().map(|bt| {
        json!({
            "name": format!("{}-test", bt.slug()),
            "inherits": "common-test",
            "configuration": bt.cmake_name(),
        })
    }))
    .collect();

    json!({
        "version": PRESETS_VERSION,
        "configurePresets": [Value::Object(configure)],
        "buildPresets": base_build_presets(config),
        "testPresets": test_presets,
        "packagePresets": [base_package_preset(config)],
    })
}

/// Replace `buildPresets` and `packagePresets` in `document`.
pub fn merge_presets(
    document: &mut Map<String, Value>,
    build: &[BuildPreset],
    package: &[PackagePreset],
) {
    document.insert("buildPresets".into(), json!(build));
    document.insert("packagePresets".into(), json!(package));
}

/// Regenerate the presets for `targets` in the file at `path`.
///
/// A missing file starts from [`baseline_document`].
pub fn write_presets(path: &Path, config: &PresetsConfig, targets: &[Target]) -> Result<()> {
    let mut document = if path.exists() {
        match jsonio::read_json::<Value>(path)? {
            Value::Object(map) => map,
            _ => {
                return Err(ScaffoldError::json(
                    path,
                    serde::de::Error::custom("expected a JSON object at the top level"),
                ));
            }
        }
    } else {
        match baseline_document(config) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    };

    merge_presets(
        &mut document,
        &build_presets(config, targets),
        &package_presets(config, targets),
    );
    jsonio::write_json(path, &Value::Object(document))
}

pub fn write_baseline(path: &Path, config: &PresetsConfig) -> Result<()> {
    jsonio::write_json(path, &baseline_document(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sim() -> Target {
        Target::App {
            name: "sim".into(),
            libs: vec!["mathutils".into()],
        }
    }

    #[test]
    fn test_base_presets_are_hidden_except_docs() {
        let presets = base_build_presets(&PresetsConfig::default());
        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["common-build", "release-build", "debug-build", "debinfo-build", "docs-build"]
        );
        assert!(presets[..4].iter().all(|p| p.hidden));
        assert!(!presets[4].hidden);
        assert_eq!(presets[0].jobs, Some(6));
    }

    #[test]
    fn test_app_build_presets() {
        let presets = build_presets(&PresetsConfig::default(), &[sim()]);
        let release = presets
            .iter()
            .find(|p| p.name == "sim-release-build")
            .unwrap();
        assert_eq!(release.inherits.as_deref(), Some("release-build"));
        assert_eq!(release.targets, vec!["sim", "mathutils", "test_mathutils"]);
        assert!(presets.iter().any(|p| p.name == "sim-debug-build"));
        assert!(presets.iter().any(|p| p.name == "sim-debinfo-build"));
        assert_eq!(presets.len(), 8);
    }

    #[test]
    fn test_preset_json_shape() {
        let value = json!(build_presets(&PresetsConfig::default(), &[sim()]));
        assert_eq!(
            value[0],
            json!({ "name": "common-build", "configurePreset": "default-config", "jobs": 6, "hidden": true })
        );
        assert_eq!(
            value[5],
            json!({
                "name": "sim-release-build",
                "inherits": "release-build",
                "targets": ["sim", "mathutils", "test_mathutils"]
            })
        );
    }

    #[test]
    fn test_package_presets_scope_release_build() {
        let value = json!(package_presets(&PresetsConfig::default(), &[sim()]));
        assert_eq!(value[0]["hidden"], json!(true));
        assert_eq!(value[0]["output"], json!({ "debug": false, "verbose": false }));
        assert_eq!(value[0]["packageDirectory"], json!("../install/"));
        assert_eq!(
            value[1],
            json!({
                "name": "sim-package",
                "inherits": "default-package",
                "configurations": ["sim-release-build"]
            })
        );
    }

    #[test]
    fn test_merge_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CMakeUserPresets.json");
        fs::write(
            &path,
            r#"{"version": 8, "configurePresets": [{"name": "mine"}], "buildPresets": [], "testPresets": [{"name": "t"}], "packagePresets": []}"#,
        )
        .unwrap();

        write_presets(&path, &PresetsConfig::default(), &[sim()]).unwrap();
        let doc: Value = jsonio::read_json(&path).unwrap();
        assert_eq!(doc["configurePresets"], json!([{ "name": "mine" }]));
        assert_eq!(doc["testPresets"], json!([{ "name": "t" }]));
        assert_eq!(doc["buildPresets"].as_array().unwrap().len(), 8);

        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["version", "configurePresets", "buildPresets", "testPresets", "packagePresets"]
        );
    }

    #[test]
    fn test_regeneration_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CMakeUserPresets.json");
        let config = PresetsConfig::default();
        write_presets(&path, &config, &[sim()]).unwrap();
        let first = fs::read(&path).unwrap();
        write_presets(&path, &config, &[sim()]).unwrap();
        assert_eq!(first, fs::read(&path).unwrap());
    }

    #[test]
    fn test_baseline_has_no_target_presets() {
        let doc = baseline_document(&PresetsConfig::default());
        assert_eq!(doc["version"], json!(8));
        assert_eq!(doc["buildPresets"].as_array().unwrap().len(), 5);
        assert_eq!(doc["packagePresets"].as_array().unwrap().len(), 1);
        assert_eq!(doc["testPresets"].as_array().unwrap().len(), 4);
        assert_eq!(doc["configurePresets"][0]["inherits"], json!("conf-windows"));
    }

    #[test]
    fn test_baseline_compiler_cache_variables() {
        let doc = baseline_document(&PresetsConfig::default());
        let cache = &doc["configurePresets"][0]["cacheVariables"];
        assert_eq!(cache["CMAKE_C_COMPILER"], json!("cl.exe"));
        assert_eq!(cache["CMAKE_CXX_COMPILER"], json!("cl.exe"));
        assert_eq!(cache["VCPKG_TARGET_TRIPLET"], json!("x64-windows"));

        let config = PresetsConfig {
            c_compiler: String::new(),
            cxx_compiler: "clang++".to_string(),
            ..Default::default()
        };
        let doc = baseline_document(&config);
        let cache = doc["configurePresets"][0]["cacheVariables"].as_object().unwrap();
        assert!(!cache.contains_key("CMAKE_C_COMPILER"));
        assert_eq!(cache["CMAKE_CXX_COMPILER"], json!("clang++"));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CMakeUserPresets.json");
        fs::write(&path, "[]").unwrap();
        let err = write_presets(&path, &PresetsConfig::default(), &[]).unwrap_err();
        assert!(matches!(err, ScaffoldError::Json { .. }));
    }
}
