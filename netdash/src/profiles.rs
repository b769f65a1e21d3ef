//! Backend profiles: load/save a JSON mapping of profile name -> { base_url, username }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/netdash/profiles.json (fallback ~/.config/netdash/profiles.json)
//! Passwords and tokens are never written here.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::PathBuf};

pub const PROFILES_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

impl Default for ProfilesFile {
    fn default() -> Self {
        Self {
            profiles: BTreeMap::new(),
            version: PROFILES_VERSION,
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("netdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netdash")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

/// Missing or unreadable file yields an empty set.
pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed profiles file");
            ProfilesFile::default()
        }),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(io::Error::other)?;
    fs::write(&path, data)?;
    tracing::debug!(path = %path.display(), "profiles saved");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveProfile {
    /// URL given on the command line (may be persisted by the caller).
    Direct(String),
    /// Loaded from an existing profile entry.
    Loaded(ProfileEntry),
    /// A profile name was given without a URL and no such profile exists.
    Missing(String),
    /// Nothing given; use the built-in backend address.
    Default,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub base_url: Option<String>,
}

impl ProfileRequest {
    pub fn resolve(&self, pf: &ProfilesFile) -> ResolveProfile {
        match (&self.profile_name, &self.base_url) {
            (_, Some(u)) => ResolveProfile::Direct(u.clone()),
            (Some(name), None) => match pf.profiles.get(name) {
                Some(entry) => ResolveProfile::Loaded(entry.clone()),
                None => ResolveProfile::Missing(name.clone()),
            },
            (None, None) => ResolveProfile::Default,
        }
    }
}

/// What to do with a named profile when a URL was given explicitly.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveDecision {
    /// New profile: write without asking.
    Create,
    /// Identical to what is stored: nothing to do.
    Unchanged,
    /// Stored entry differs: overwrite only with --save or user consent.
    Changed,
}

pub fn save_decision(pf: &ProfilesFile, name: &str, entry: &ProfileEntry) -> SaveDecision {
    match pf.profiles.get(name) {
        None => SaveDecision::Create,
        Some(e) if e == entry => SaveDecision::Unchanged,
        Some(_) => SaveDecision::Changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(name: &str, url: &str) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert(
            name.into(),
            ProfileEntry {
                base_url: url.into(),
                username: Some("admin".into()),
            },
        );
        pf
    }

    #[test]
    fn resolve_paths() {
        let pf = file_with("lab", "http://10.0.0.5:5000");

        let r = ProfileRequest { profile_name: Some("lab".into()), base_url: None }.resolve(&pf);
        assert_eq!(
            r,
            ResolveProfile::Loaded(ProfileEntry {
                base_url: "http://10.0.0.5:5000".into(),
                username: Some("admin".into()),
            })
        );

        let r = ProfileRequest { profile_name: Some("home".into()), base_url: None }.resolve(&pf);
        assert_eq!(r, ResolveProfile::Missing("home".into()));

        let r = ProfileRequest { profile_name: Some("lab".into()), base_url: Some("http://x".into()) }
            .resolve(&pf);
        assert_eq!(r, ResolveProfile::Direct("http://x".into()));

        let r = ProfileRequest { profile_name: None, base_url: None }.resolve(&pf);
        assert_eq!(r, ResolveProfile::Default);
    }

    #[test]
    fn save_decisions() {
        let pf = file_with("lab", "http://10.0.0.5:5000");
        let entry = |url: &str, user: Option<&str>| ProfileEntry {
            base_url: url.into(),
            username: user.map(str::to_string),
        };
        assert_eq!(save_decision(&pf, "new", &entry("http://a", None)), SaveDecision::Create);
        assert_eq!(
            save_decision(&pf, "lab", &entry("http://10.0.0.5:5000", Some("admin"))),
            SaveDecision::Unchanged
        );
        assert_eq!(
            save_decision(&pf, "lab", &entry("http://other", Some("admin"))),
            SaveDecision::Changed
        );
        assert_eq!(
            save_decision(&pf, "lab", &entry("http://10.0.0.5:5000", Some("ops"))),
            SaveDecision::Changed
        );
    }

    #[test]
    fn username_is_optional_on_disk() {
        let pf: ProfilesFile =
            serde_json::from_str(r#"{"profiles":{"a":{"base_url":"http://a"}}}"#).unwrap();
        assert_eq!(pf.profiles["a"].username, None);
        assert_eq!(pf.version, 0);

        let out = serde_json::to_string(&ProfileEntry { base_url: "http://a".into(), username: None })
            .unwrap();
        assert!(!out.contains("username"), "{out}");
    }
}
