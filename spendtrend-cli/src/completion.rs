//! `--install-completion`: write a generated completion script and hook it
//! into the user's shell startup file.

use anyhow::{Context, Result};
use clap_complete::{Shell, generate};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Detect the shell from `$SHELL` and install for it under `$HOME`.
pub fn install(cmd: &mut clap::Command) -> Result<Shell> {
    let shell = Shell::from_env().context("cannot detect shell from $SHELL")?;
    let home = std::env::var("HOME").context("HOME is not set")?;
    install_into(cmd, shell, Path::new(&home))?;
    Ok(shell)
}

pub fn install_into(cmd: &mut clap::Command, shell: Shell, home: &Path) -> Result<PathBuf> {
    let name = cmd.get_name().to_string();
    let script_path = script_path(shell, &name, home);

    let mut script = Vec::new();
    generate(shell, cmd, &name, &mut script);

    if let Some(dir) = script_path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::write(&script_path, script)
        .with_context(|| format!("write {}", script_path.display()))?;
    log::debug!("wrote {shell} completion to {}", script_path.display());

    if let Some(rc) = rc_file(shell, home) {
        let line = format!("source \"{}\"", script_path.display());
        if append_once(&rc, &line)? {
            log::debug!("hooked completion into {}", rc.display());
        }
    }

    Ok(script_path)
}

fn script_path(shell: Shell, name: &str, home: &Path) -> PathBuf {
    let dir = home.join(".spendtrend").join("completions");
    match shell {
        // fish autoloads from here, no rc hook needed
        Shell::Fish => home
            .join(".config")
            .join("fish")
            .join("completions")
            .join(format!("{name}.fish")),
        Shell::Zsh => dir.join(format!("_{name}")),
        Shell::Bash => dir.join(format!("{name}.bash")),
        Shell::Elvish => dir.join(format!("{name}.elv")),
        Shell::PowerShell => dir.join(format!("{name}.ps1")),
        _ => dir.join(name),
    }
}

fn rc_file(shell: Shell, home: &Path) -> Option<PathBuf> {
    match shell {
        Shell::Bash => Some(home.join(".bashrc")),
        Shell::Zsh => Some(home.join(".zshrc")),
        _ => None,
    }
}

/// Append `line` to `rc` unless it is already there. Returns true if written.
fn append_once(rc: &Path, line: &str) -> Result<bool> {
    let existing = match fs::read_to_string(rc) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("read {}", rc.display())),
    };
    if existing.lines().any(|l| l.trim() == line) {
        return Ok(false);
    }

    let mut f = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(rc)
        .with_context(|| format!("open {}", rc.display()))?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(f)?;
    }
    writeln!(f, "{line}")?;
    Ok(true)
}
