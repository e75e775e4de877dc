use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn settings_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "aimtrain") {
            pd.config_dir().join("settings.json")
        } else {
            PathBuf::from("aimtrain_settings.json")
        }
    }
}
