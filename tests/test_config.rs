use std::path::PathBuf;
use std::time::Duration;

use warden::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.root, PathBuf::from("."));
    assert_eq!(cfg.index_file, "index.html");
    assert!(cfg.access_log.is_none());
    assert_eq!(cfg.keep_alive_timeout(), Duration::from_secs(15));
    assert_eq!(cfg.max_header_bytes, 8192);
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        r#"
listen_addr: "0.0.0.0:3000"
root: /srv/www
access_log: /var/log/warden/access.log
keep_alive_timeout_secs: 5
mime_types:
  md: text/markdown
"#,
    )
    .unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.access_log, Some(PathBuf::from("/var/log/warden/access.log")));
    assert_eq!(cfg.keep_alive_timeout(), Duration::from_secs(5));
    // Unset fields keep their defaults.
    assert_eq!(cfg.index_file, "index.html");
}

#[test]
fn test_config_mime_table_extends_defaults() {
    let cfg =
        Config::from_yaml_str("mime_types:\n  .MD: text/markdown\n  txt: text/x-plain\n").unwrap();
    let table = cfg.mime_table();

    assert_eq!(table.lookup("notes.md".as_ref()), Some("text/markdown"));
    assert_eq!(table.lookup("notes.txt".as_ref()), Some("text/x-plain"));
    assert_eq!(table.lookup("index.html".as_ref()), Some("text/html"));
}

#[test]
fn test_config_rejects_index_with_separator() {
    assert!(Config::from_yaml_str("index_file: ../index.html\n").is_err());
    assert!(Config::from_yaml_str("index_file: \"\"\n").is_err());
}

#[test]
fn test_config_rejects_zero_keep_alive_timeout() {
    assert!(Config::from_yaml_str("keep_alive_timeout_secs: 0\n").is_err());
    assert!(Config::from_yaml_str("keep_alive_timeout_secs: 1\n").is_ok());
}

#[test]
fn test_config_rejects_bad_yaml() {
    assert!(Config::from_yaml_str("keep_alive_timeout_secs: soon\n").is_err());
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warden.yaml");
    std::fs::write(&path, "listen_addr: \"127.0.0.1:9000\"\n").unwrap();

    let cfg = Config::from_file(&path).unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");

    assert!(Config::from_file(dir.path().join("missing.yaml")).is_err());
}

// Environment handling lives in one test; parallel tests would race on it.
#[test]
fn test_config_env_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warden.yaml");
    std::fs::write(&path, "listen_addr: \"127.0.0.1:9000\"\nroot: /from/file\n").unwrap();

    unsafe {
        std::env::remove_var("WARDEN_CONFIG");
        std::env::remove_var("LISTEN");
        std::env::remove_var("WARDEN_ROOT");
    }
    assert_eq!(Config::load().unwrap().listen_addr, "127.0.0.1:8080");

    unsafe {
        std::env::set_var("WARDEN_CONFIG", &path);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.root, PathBuf::from("/from/file"));

    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:5000");
        std::env::set_var("WARDEN_ROOT", "/from/env");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.root, PathBuf::from("/from/env"));

    unsafe {
        std::env::remove_var("WARDEN_CONFIG");
        std::env::remove_var("LISTEN");
        std::env::remove_var("WARDEN_ROOT");
    }
}
