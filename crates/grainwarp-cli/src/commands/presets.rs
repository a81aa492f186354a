//! Preset management commands.
//!
//! List, show and copy presets, and show where user presets live.

use clap::{Args, Subcommand};
use grainwarp_config::paths::{ensure_user_presets_dir, list_user_presets, preset_name_from_path};
use grainwarp_config::{Preset, factory_presets, get_factory_preset, resolve_preset, user_presets_dir};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long, conflicts_with = "user")]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Print a preset as TOML
    Show {
        /// Preset name or path
        name: String,
    },

    /// Copy a factory preset to user presets for customization
    Copy {
        /// Factory preset name
        source: String,

        /// New preset name (uses the source name if not given)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing user preset
        #[arg(long)]
        force: bool,
    },

    /// Show the user preset directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Copy {
            source,
            name,
            force,
        } => copy_preset(&source, name.as_deref(), force),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Start one with: grainwarp presets copy <factory-name>\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "unreadable preset");
                        println!("  {:20} - (error loading)", name);
                    }
                }
            }
            println!();
        }
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn copy_preset(source: &str, name: Option<&str>, force: bool) -> anyhow::Result<()> {
    let Some(mut preset) = get_factory_preset(source) else {
        anyhow::bail!("Factory preset '{}' not found", source);
    };

    let file_stem = name.unwrap_or(source);
    if let Some(name) = name {
        preset.name = name.to_string();
    }

    let path = ensure_user_presets_dir()?.join(format!("{file_stem}.toml"));
    if path.exists() && !force {
        anyhow::bail!(
            "Preset '{}' already exists. Use --force to overwrite.",
            file_stem
        );
    }

    preset.save(&path)?;
    println!("Copied '{}' to {}", source, path.display());
    Ok(())
}
