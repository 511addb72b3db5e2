use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub bin_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_goup"));

        Self { temp_dir, bin_path }
    }

    /// Command wired to a manifest endpoint, with PATH restricted to the
    /// context's fake install so no system Go toolchain leaks into the probe.
    pub fn cmd(&self, manifest_url: &str) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        cmd.env("GOUP_MANIFEST_URL", manifest_url);
        cmd.env("PATH", self.go_bin_dir());
        cmd
    }

    fn go_root(&self) -> PathBuf {
        self.temp_dir.path().join("go")
    }

    fn go_bin_dir(&self) -> PathBuf {
        self.go_root().join("bin")
    }

    /// Create a fake Go install root on the context's PATH whose VERSION
    /// marker reports `version`.
    #[cfg(unix)]
    pub fn install_fake_go(&self, version: &str) {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = self.go_bin_dir();
        fs::create_dir_all(&bin_dir).expect("Failed to create fake go root");

        let go = bin_dir.join("go");
        fs::write(&go, "#!/bin/sh\nexit 0\n").expect("Failed to write fake go binary");
        let mut perms = fs::metadata(&go).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&go, perms).unwrap();

        fs::write(self.go_root().join("VERSION"), format!("go{}\n", version))
            .expect("Failed to write VERSION marker");
    }
}

/// The host as the go.dev manifest would name it. Mirrors the platform
/// normalization inside the binary so tests pass on any machine.
pub fn host_manifest_platform() -> (String, String, String) {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "arm" => "armv6l",
        "x86" => "386",
        other => other,
    };
    let kind = if os == "darwin" || os == "windows" {
        "installer"
    } else {
        "archive"
    };
    (os.to_string(), arch.to_string(), kind.to_string())
}

/// Build a manifest body with one host-platform file per (version, stable).
pub fn manifest_with(releases: &[(&str, bool)]) -> String {
    let (os, arch, kind) = host_manifest_platform();

    let releases: Vec<serde_json::Value> = releases
        .iter()
        .map(|(version, stable)| {
            serde_json::json!({
                "version": format!("go{}", version),
                "stable": stable,
                "files": [{
                    "filename": format!("go{}.{}-{}.artifact", version, os, arch),
                    "os": os,
                    "arch": arch,
                    "version": format!("go{}", version),
                    "sha256": "0000",
                    "size": 4,
                    "kind": kind,
                }],
            })
        })
        .collect();

    serde_json::to_string(&releases).unwrap()
}

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.status.success(),
            "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    pub fn assert_stdout_not_contains(&self, text: &str) -> &Self {
        assert!(
            !self.stdout.contains(text),
            "Stdout unexpectedly contained '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
