//! Build-time docs under `$OUT_DIR`: `man/` holds one page per visible
//! command, `completions/` one script per packaged shell.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{Shell, generate_to};

// cli.rs only depends on clap + clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

const PACKAGED_SHELLS: [Shell; 3] = [Shell::Bash, Shell::Zsh, Shell::Fish];

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .ok_or_else(|| io::Error::other("OUT_DIR not set by Cargo"))?
        .into();
    let mut cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;
    write_man_pages(&cmd, &man_dir)?;

    let completions_dir = out_dir.join("completions");
    fs::create_dir_all(&completions_dir)?;
    for shell in PACKAGED_SHELLS {
        generate_to(shell, &mut cmd, "locapart", &completions_dir)?;
    }
    Ok(())
}

/// `locapart.1`, `locapart-cities.1`, `locapart-cities-list.1`, ...
fn write_man_pages(root: &clap::Command, dir: &Path) -> io::Result<()> {
    let mut pending = vec![root.clone()];
    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();
        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| sub.clone().name(format!("{name}-{}", sub.get_name()))),
        );

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd).render(&mut page)?;
        fs::write(dir.join(format!("{name}.1")), page)?;
    }
    Ok(())
}
