use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub const PLACES_FILE_NAME: &str = "places.sqlite";
const DEFAULT_PROFILE_SUFFIX: &str = ".default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    NotFound { root: PathBuf },
    Io { root: PathBuf, message: String },
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { root } => write!(
                f,
                "no profile with a places store under {}",
                root.display()
            ),
            Self::Io { root, message } => write!(
                f,
                "cannot read profiles directory {}: {message}",
                root.display()
            ),
        }
    }
}

impl std::error::Error for ProfileError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLocation {
    pub profile_name: String,
    pub places_path: PathBuf,
    pub db_size: u64,
}

/// Firefox's profiles directory for the current user.
pub fn default_profiles_root() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        base.join("Mozilla").join("Firefox").join("Profiles")
    }

    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("Firefox")
            .join("Profiles")
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        home_dir().join(".mozilla").join("firefox")
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// Every immediate subdirectory of `profiles_root` holding `file_name`, in
/// directory-listing order. A missing root has no profiles; a root that
/// exists but cannot be listed is an error. Unreadable entries below it are
/// skipped.
pub fn list_profiles(
    profiles_root: &Path,
    file_name: &str,
) -> Result<Vec<ProfileLocation>, ProfileError> {
    if !profiles_root.exists() {
        return Ok(Vec::new());
    }
    std::fs::read_dir(profiles_root).map_err(|e| ProfileError::Io {
        root: profiles_root.to_path_buf(),
        message: e.to_string(),
    })?;

    let profiles = WalkDir::new(profiles_root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let places_path = entry.path().join(file_name);
            let meta = std::fs::metadata(&places_path).ok()?;
            if !meta.is_file() {
                return None;
            }
            Some(ProfileLocation {
                profile_name: entry.file_name().to_string_lossy().into_owned(),
                places_path,
                db_size: meta.len(),
            })
        })
        .collect();
    Ok(profiles)
}

/// Picks the places store to query: the first `*.default` profile that has
/// one, else the first profile that has one at all.
pub fn resolve_places_path(profiles_root: &Path, file_name: &str) -> Result<PathBuf, ProfileError> {
    let profiles = list_profiles(profiles_root, file_name)?;
    let chosen = profiles
        .iter()
        .find(|p| p.profile_name.ends_with(DEFAULT_PROFILE_SUFFIX))
        .or_else(|| profiles.first())
        .ok_or_else(|| ProfileError::NotFound {
            root: profiles_root.to_path_buf(),
        })?;
    Ok(chosen.places_path.clone())
}
