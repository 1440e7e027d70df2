//! CLI arg parsing tests for dashtop
use assert_cmd::Command;

fn dashtop(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dashtop"));
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn text(out: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let td = tempfile::tempdir().unwrap();
    let out = dashtop(td.path()).arg("--help").output().unwrap();
    assert!(out.status.success());
    let t = text(&out);
    for flag in ["--profile", "-P", "--save", "--lang", "--config", "--dry-run"] {
        assert!(t.contains(flag), "help text missing {flag}\n{t}");
    }
}

#[test]
fn test_help_wins_over_other_flags() {
    let td = tempfile::tempdir().unwrap();
    let out = dashtop(td.path())
        .args(["--profile", "dev", "--lang", "en", "--help"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(text(&out).contains("Usage:"));
}

#[test]
fn test_dry_run_prints_resolved_url() {
    let td = tempfile::tempdir().unwrap();
    let out = dashtop(td.path())
        .args(["--dry-run", "http://admin.example:8000/"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", text(&out));
    assert!(String::from_utf8_lossy(&out.stdout).contains("http://admin.example:8000"));
}

#[test]
fn test_dry_run_falls_back_to_config_base_url() {
    let td = tempfile::tempdir().unwrap();
    let cfg = td.path().join("custom.json");
    std::fs::write(&cfg, r#"{ "base_url": "http://from-config:9000" }"#).unwrap();
    let out = dashtop(td.path())
        .args(["--dry-run", "--config"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", text(&out));
    assert!(String::from_utf8_lossy(&out.stdout).contains("http://from-config:9000"));
}

#[test]
fn test_non_http_url_is_rejected() {
    let td = tempfile::tempdir().unwrap();
    let out = dashtop(td.path())
        .args(["--dry-run", "ws://host:3000/ws"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(text(&out).contains("Unsupported scheme"));
}

#[test]
fn test_broken_config_fails_startup() {
    let td = tempfile::tempdir().unwrap();
    let cfg = td.path().join("broken.json");
    std::fs::write(&cfg, "{ nope").unwrap();
    let out = dashtop(td.path())
        .args(["--dry-run", "--config"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(text(&out).contains("broken.json"), "{}", text(&out));
}
