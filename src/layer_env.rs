use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{LAYER_MANIFEST_ENV, LAYER_MANIFEST_FILE, LAYER_NAME};

/// Locates the Vulkan layer manifest the spawned target must load to report
/// frames. `None` means the target launches uninstrumented; that is logged at
/// the call site, never a launch failure.
pub(crate) fn resolve_layer_manifest(root_dir: Option<&Path>) -> Option<PathBuf> {
    let candidate = manifest_candidate(env::var(LAYER_MANIFEST_ENV).ok().as_deref(), root_dir)?;
    if !candidate.is_file() {
        return None;
    }
    // The loader needs an absolute path in the environment.
    fs::canonicalize(&candidate).ok()
}

fn manifest_candidate(env_value: Option<&str>, root_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(value) = env_value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    root_dir.map(|root| root.join("layer").join(LAYER_MANIFEST_FILE))
}

pub(crate) fn layer_environment(manifest: Option<&Path>) -> Vec<(String, String)> {
    let Some(manifest) = manifest else {
        return Vec::new();
    };

    vec![
        (
            "VK_ADD_IMPLICIT_LAYER_PATH".to_string(),
            manifest.to_string_lossy().to_string(),
        ),
        ("VK_LAYERS_ALLOW_ENV_VAR".to_string(), "1".to_string()),
        ("VK_INSTANCE_LAYERS".to_string(), LAYER_NAME.to_string()),
        ("VK_LOADER_LAYERS_ENABLE".to_string(), LAYER_NAME.to_string()),
        ("ENABLE_FRAMESCOPE_LAYER".to_string(), "1".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_candidate_prefers_env_override() {
        let candidate = manifest_candidate(Some("/opt/layer/manifest.json"), None);
        assert_eq!(candidate, Some(PathBuf::from("/opt/layer/manifest.json")));

        let candidate =
            manifest_candidate(Some("  "), Some(Path::new("/home/user/.framescope")));
        assert_eq!(
            candidate,
            Some(PathBuf::from(
                "/home/user/.framescope/layer/VK_LAYER_framescope.json"
            ))
        );

        assert_eq!(manifest_candidate(None, None), None);
    }

    #[test]
    fn layer_environment_is_empty_without_a_manifest() {
        assert!(layer_environment(None).is_empty());
    }

    #[test]
    fn layer_environment_enables_the_layer_for_the_loader() {
        let env = layer_environment(Some(Path::new("/opt/layer/manifest.json")));
        let lookup = |key: &str| {
            env.iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        };

        assert_eq!(
            lookup("VK_ADD_IMPLICIT_LAYER_PATH"),
            Some("/opt/layer/manifest.json")
        );
        assert_eq!(lookup("VK_LAYERS_ALLOW_ENV_VAR"), Some("1"));
        assert_eq!(lookup("VK_INSTANCE_LAYERS"), Some(LAYER_NAME));
        assert_eq!(lookup("VK_LOADER_LAYERS_ENABLE"), Some(LAYER_NAME));
        assert_eq!(lookup("ENABLE_FRAMESCOPE_LAYER"), Some("1"));
    }

    #[test]
    fn resolve_layer_manifest_requires_an_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir should be creatable");
        assert_eq!(resolve_layer_manifest(Some(dir.path())), None);

        let layer_dir = dir.path().join("layer");
        fs::create_dir(&layer_dir).expect("layer dir should be creatable");
        let manifest_path = layer_dir.join(LAYER_MANIFEST_FILE);
        fs::write(&manifest_path, "{}").expect("manifest write should succeed");

        let resolved = resolve_layer_manifest(Some(dir.path()))
            .expect("existing manifest should resolve");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with(LAYER_MANIFEST_FILE));
    }
}
