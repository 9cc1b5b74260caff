use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn completions_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rst-completions"))
}

/// Command for the binary with every `RSTCOMPLETE_*` variable cleared.
pub fn completions_command() -> Command {
    let mut cmd = Command::new(completions_binary());
    for name in [
        "RSTCOMPLETE_REGISTRY",
        "RSTCOMPLETE_EXTENSIONS",
        "RSTCOMPLETE_LANGUAGE",
        "RSTCOMPLETE_SKIP_BUILTIN_EXTENSIONS",
        "RUST_LOG",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing fixture {}", path.display()))?;
    Ok(path)
}

/// Text of the role candidates defun, up to the blank line that ends it.
pub fn roles_region(output: &str) -> &str {
    let start = output
        .find("(defun auto-complete-rst-roles-candidates ()")
        .expect("roles defun present");
    let rest = &output[start..];
    &rest[..rest.find("\n\n").unwrap_or(rest.len())]
}
