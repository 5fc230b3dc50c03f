use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap_complete::{generate, Generator, Shell};
use tracing::info;

use bijli_cli::cli::build_cli_command;

/// Completions go to stdout, to `out`, or into `out/<script name>` when `out`
/// is an existing directory such as `~/.local/share/bash-completion/completions`.
pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let mut cmd = build_cli_command();
    let bin_name = cmd.get_name().to_string();
    match out {
        Some(out) => {
            let path = completion_path(shell, &bin_name, out);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let mut file = fs::File::create(&path)
                .with_context(|| format!("writing completions to {}", path.display()))?;
            generate(shell, &mut cmd, &bin_name, &mut file);
            info!("Wrote {shell} completions for {bin_name} to {}", path.display());
        }
        None => generate(shell, &mut cmd, &bin_name, &mut io::stdout()),
    }
    Ok(())
}

fn completion_path(shell: Shell, bin_name: &str, out: &Path) -> PathBuf {
    if out.is_dir() {
        out.join(shell.file_name(bin_name))
    } else {
        out.to_path_buf()
    }
}
