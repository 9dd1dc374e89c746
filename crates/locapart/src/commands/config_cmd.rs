//! Config subcommand handlers.

use dialoguer::{Input, Select};

use locapart_core::{DEFAULT_BASE_URL, ReconcilePolicy};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output::Output;

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let out = Output::from_global(global);

    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("Locapart configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()?;

            let base_url: String = Input::new()
                .with_prompt("Resource base URL")
                .default(DEFAULT_BASE_URL.into())
                .validate_with(|raw: &String| {
                    config::parse_base_url(raw).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()?;

            let policies = &[
                "Undo local edits the server rejects (recommended)",
                "Keep local edits the server rejects",
            ];
            let reconcile = match Select::new()
                .with_prompt("When a change fails")
                .items(policies)
                .default(0)
                .interact()?
            {
                0 => ReconcilePolicy::Revert,
                _ => ReconcilePolicy::Keep,
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    base_url,
                    reconcile: Some(reconcile),
                    ..Profile::default()
                },
            );
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;
            eprintln!("\nConfiguration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: locapart cities list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            out.single(&cfg, |c| {
                toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n# {e}"))
            });
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                out.note("No profiles configured. Run: locapart config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            out.note(&format!("Default profile set to '{name}'"));
            Ok(())
        }
    }
}
