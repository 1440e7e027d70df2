//! Connection profiles: load/save simple JSON mapping of profile name -> { url }
//! Stored next to the config: $XDG_CONFIG_HOME/dashtop/profiles.json

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::PathBuf};

use crate::config::config_dir;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(io::Error::other)?;
    fs::write(path, data)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveProfile {
    /// Use the provided base URL (maybe saved later by the caller)
    Direct(String),
    /// Loaded from an existing profile entry
    Loaded(String),
    /// Should prompt user to select among profile names
    PromptSelect(Vec<String>),
    /// Should prompt user to create a new profile (name)
    PromptCreate(String),
    /// Nothing given and nothing saved
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        match (self.profile_name, self.url) {
            (_, Some(u)) => ResolveProfile::Direct(u),
            (Some(name), None) => match pf.profiles.get(&name) {
                Some(entry) => ResolveProfile::Loaded(entry.url.clone()),
                None => ResolveProfile::PromptCreate(name),
            },
            (None, None) if pf.profiles.is_empty() => ResolveProfile::None,
            (None, None) => ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect()),
        }
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
                url: url.into(),
            },
        );
        pf
    }

    #[test]
    fn resolution_paths() {
        let pf = file_with("prod", "http://prod:8000");
        let req = |p: Option<&str>, u: Option<&str>| ProfileRequest {
            profile_name: p.map(String::from),
            url: u.map(String::from),
        };
        assert_eq!(
            req(Some("prod"), None).resolve(&pf),
            ResolveProfile::Loaded("http://prod:8000".into())
        );
        assert_eq!(
            req(Some("dev"), None).resolve(&pf),
            ResolveProfile::PromptCreate("dev".into())
        );
        assert_eq!(
            req(Some("prod"), Some("http://other")).resolve(&pf),
            ResolveProfile::Direct("http://other".into())
        );
        assert_eq!(
            req(None, None).resolve(&pf),
            ResolveProfile::PromptSelect(vec!["prod".into()])
        );
        assert_eq!(
            req(None, None).resolve(&ProfilesFile::default()),
            ResolveProfile::None
        );
    }
}
