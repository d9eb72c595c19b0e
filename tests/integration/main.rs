//! Integration tests for lbr

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A config file pointing storage and job records into a temp dir
    struct Workspace {
        dir: TempDir,
        config: PathBuf,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = dir.path().join("config.toml");
            let content = format!(
                "[general]\nusername = \"alice\"\n\n[storage]\nworking_dir = {:?}\n\n[jobs]\npath = {:?}\n",
                dir.path().join("work"),
                dir.path().join("jobs.json")
            );
            std::fs::write(&config, content).unwrap();
            Self { dir, config }
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        fn lbr(&self) -> Command {
            let mut cmd = lbr();
            cmd.arg("--config").arg(&self.config);
            cmd
        }
    }

    fn lbr() -> Command {
        let mut cmd = cargo_bin_cmd!("lbr");
        cmd.env_remove("LBR_CONFIG")
            .env_remove("LBR_TOKEN")
            .env_remove("LBR_USER");
        cmd
    }

    #[test]
    fn help_displays() {
        lbr()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("LabBook resolver toolkit"));
    }

    #[test]
    fn version_displays() {
        lbr()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("lbr"));
    }

    #[test]
    fn config_path() {
        let ws = Workspace::new();
        ws.lbr()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let ws = Workspace::new();
        ws.lbr()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"))
            .stdout(predicate::str::contains("alice"));
    }

    #[test]
    fn config_init_writes_defaults() {
        let ws = Workspace::new();
        let target = ws.path().join("nested").join("config.toml");
        lbr()
            .arg("--config")
            .arg(&target)
            .args(["config", "init"])
            .assert()
            .success();
        assert!(target.exists());
    }

    #[test]
    fn labbook_list_empty() {
        let ws = Workspace::new();
        ws.lbr()
            .args(["labbook", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No LabBooks found"));
    }

    #[test]
    fn labbook_create_then_list() {
        let ws = Workspace::new();
        for name in ["beta", "alpha", "gamma"] {
            ws.lbr()
                .args(["labbook", "create", name, "--description", "test"])
                .assert()
                .success();
        }

        ws.lbr()
            .args(["labbook", "list", "--format", "plain", "--first", "2"])
            .assert()
            .success()
            .stdout("alice/alpha\nalice/beta\n");

        ws.lbr()
            .args(["labbook", "list", "--format", "json", "--sort", "desc"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"pageInfo\""))
            .stdout(predicate::str::contains("\"alice&gamma\""));
    }

    #[test]
    fn labbook_create_duplicate_fails() {
        let ws = Workspace::new();
        ws.lbr().args(["labbook", "create", "demo"]).assert().success();
        ws.lbr()
            .args(["labbook", "create", "demo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn labbook_list_rejects_bad_arguments() {
        let ws = Workspace::new();
        ws.lbr()
            .args(["labbook", "list", "--sort", "sideways"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported sort"));

        ws.lbr()
            .args(["labbook", "list", "--first", "1", "--last", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid pagination"));
    }

    #[test]
    fn environment_of_missing_labbook() {
        let ws = Workspace::new();
        ws.lbr()
            .args(["environment", "alice", "ghost"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn remote_list_requires_token() {
        let ws = Workspace::new();
        ws.lbr()
            .args(["remote", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("token"));
    }

    #[test]
    fn remote_delete_without_confirm_is_dry_run() {
        let ws = Workspace::new();
        ws.lbr()
            .args(["remote", "delete", "alice", "demo", "--token", "abc"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Would delete alice/demo"));
    }
}
