//! Integration tests for depinject

mod http;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Binary isolated from the user's config and cache
    fn depinject(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("depinject");
        cmd.env("DEPINJECT_CONFIG", dir.path().join("config.toml"))
            .env("DEPINJECT_CACHE_DIR", dir.path().join("cache"))
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("fetch, cache and inject"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("depinject"));
    }

    #[test]
    fn resolve_is_offline() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .args(["resolve", "org.example:lib:1.0.0", "-r", "https://repo.example.com/maven2", "-f", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "https://repo.example.com/maven2/org/example/lib/1.0.0/lib-1.0.0.jar",
            ))
            .stdout(predicate::str::contains("\"cached\": false"));
    }

    #[test]
    fn resolve_plain_prints_cache_path() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .args(["resolve", "org.example:lib:1.0.0", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("lib-1.0.0.jar"));
    }

    #[test]
    fn malformed_coordinate_fails_with_hint() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .args(["fetch", "org.example:lib"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Malformed coordinate 'org.example:lib'"))
            .stderr(predicate::str::contains("group:artifact:version"));
    }

    #[test]
    fn unknown_repository_scheme_fails() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .args(["fetch", "org.example:lib:1.0.0", "-r", "ftp://repo.example.com"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid repository"));
    }

    #[test]
    fn repos_lists_presets() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .arg("repos")
            .assert()
            .success()
            .stdout(predicate::str::contains("central"))
            .stdout(predicate::str::contains("https://repo1.maven.org/maven2/"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[repositories]"));
    }

    #[test]
    fn config_init_writes_file() {
        let dir = TempDir::new().unwrap();
        depinject(&dir).args(["config", "init"]).assert().success();
        assert!(dir.path().join("config.toml").exists());
    }

    #[test]
    fn custom_repository_from_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[repositories]\ndefault = \"internal\"\n\n[repositories.custom]\ninternal = \"https://nexus.example.com/maven\"\n",
        )
        .unwrap();

        depinject(&dir)
            .args(["resolve", "org.example:lib:1.0.0", "-f", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "https://nexus.example.com/maven/org/example/lib/1.0.0/lib-1.0.0.jar",
            ));
    }

    #[test]
    fn completions_generate() {
        let dir = TempDir::new().unwrap();
        depinject(&dir)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("depinject"));
    }
}
