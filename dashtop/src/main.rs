//! Entry point for the dashtop TUI. Parses args and runs the App.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};

use dashtop::api::ApiClient;
use dashtop::app::App;
use dashtop::config::{config_path, load_config};
use dashtop::logging;
use dashtop::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use dashtop::theme::{FileThemeStorage, ThemeStore};

const USAGE: &str = "[--profile NAME|-P NAME] [--save] [--lang CODE] [--config FILE] [--dry-run] [http://HOST:PORT]";

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    lang: Option<String>,
    config: Option<PathBuf>,
    save: bool,
    dry_run: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "dashtop".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(format!("Usage: {prog} {USAGE}"));
            }
            "--profile" | "-P" => {
                out.profile = it.next();
            }
            "--lang" => {
                out.lang = it.next();
            }
            "--config" => {
                out.config = it.next().map(PathBuf::from);
            }
            "--save" => {
                out.save = true;
            }
            "--dry-run" => {
                out.dry_run = true;
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        out.profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--lang=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        out.lang = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'. Usage: {prog} {USAGE}"));
            }
            _ => {
                if out.url.is_some() {
                    return Err(format!("Unexpected argument. Usage: {prog} {USAGE}"));
                }
                out.url = Some(validate_url(&arg)?);
            }
        }
    }
    Ok(out)
}

fn validate_url(raw: &str) -> Result<String, String> {
    let parsed = url::Url::parse(raw).map_err(|e| format!("Invalid URL '{raw}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(format!(
            "Unsupported scheme '{other}' in '{raw}' (expected http:// or https://)"
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reuse the same parsing logic for testability
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            if msg.starts_with("Usage:") {
                return Ok(());
            }
            std::process::exit(2);
        }
    };

    let log_file = logging::init();

    let config_file = parsed.config.clone().unwrap_or_else(config_path);
    let mut cfg = load_config(&config_file)?;
    if let Some(code) = parsed.lang.as_deref() {
        if !cfg.set_lang(code) {
            warn!(lang = code, "unknown language, keeping {}", cfg.lang);
            eprintln!("Unknown language '{code}', keeping '{}'.", cfg.lang);
        }
    }

    let base_url = match resolve_base_url(&parsed)? {
        Resolved::Url(u) => u,
        Resolved::Configured => cfg.base_url.clone(),
        Resolved::Aborted => return Ok(()),
    };
    info!(%base_url, config = %config_file.display(), "starting");

    if parsed.dry_run {
        println!("{base_url}");
        if let Some(p) = log_file {
            println!("log: {}", p.display());
        }
        return Ok(());
    }

    let client = ApiClient::new(base_url);
    let theme = ThemeStore::load(FileThemeStorage::default_location());
    let mut app = App::new(cfg, client, theme);
    app.run().await.context("running dashboard")
}

enum Resolved {
    Url(String),
    /// Nothing given or picked: fall back to `base_url` from the config.
    Configured,
    Aborted,
}

fn resolve_base_url(parsed: &ParsedArgs) -> anyhow::Result<Resolved> {
    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
    };

    let mut profiles_mut = profiles_file.clone();
    let resolved = match req.resolve(&profiles_file) {
        ResolveProfile::Direct(u) => {
            // Possibly save if profile specified and --save or new entry
            if let Some(name) = parsed.profile.as_ref() {
                let existing = profiles_mut.profiles.get(name).map(|e| e.url.clone());
                match existing {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut
                            .profiles
                            .insert(name.clone(), ProfileEntry { url: u.clone() });
                        persist(&profiles_mut);
                    }
                    Some(saved) if saved != u => {
                        let overwrite = parsed.save
                            || prompt_yes_no(&format!(
                                "Overwrite existing profile '{name}'? [y/N]: "
                            ));
                        if overwrite {
                            profiles_mut
                                .profiles
                                .insert(name.clone(), ProfileEntry { url: u.clone() });
                            persist(&profiles_mut);
                        }
                    }
                    Some(_) => {}
                }
            }
            Resolved::Url(u)
        }
        ResolveProfile::Loaded(u) => Resolved::Url(u),
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank for the configured URL): ")?;
            let line = line.trim();
            if line.is_empty() {
                Resolved::Configured
            } else {
                match line.parse::<usize>() {
                    Ok(idx) if idx >= 1 && idx <= names.len() => {
                        match profiles_mut.profiles.get(&names[idx - 1]) {
                            Some(e) => Resolved::Url(e.url.clone()),
                            None => Resolved::Aborted,
                        }
                    }
                    _ => Resolved::Aborted,
                }
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter URL (http://HOST:PORT): ")?;
            let url = url.trim();
            if url.is_empty() {
                return Ok(Resolved::Aborted);
            }
            let url = match validate_url(url) {
                Ok(u) => u,
                Err(msg) => {
                    eprintln!("{msg}");
                    return Ok(Resolved::Aborted);
                }
            };
            profiles_mut
                .profiles
                .insert(name, ProfileEntry { url: url.clone() });
            persist(&profiles_mut);
            Resolved::Url(url)
        }
        ResolveProfile::None => Resolved::Configured,
    };
    Ok(resolved)
}

fn persist(p: &dashtop::profiles::ProfilesFile) {
    if let Err(e) = save_profiles(p) {
        warn!(error = %e, "failed to save profiles");
        eprintln!("Could not save profiles: {e}");
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
