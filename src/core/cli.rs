//! Command line interface for anchor-dropper
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs.

use crate::anchors::MergeMode;
use crate::core::config_file::ConfigFile;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

/// anchor-dropper CLI arguments
///
/// Examples:
///   anchor-dropper drop MyFont-Regular.ufo MyFont-Bold.ufo
///   anchor-dropper drop MyFont.ufo --rules latin.glyphConstruction --overwrite
///   anchor-dropper clear MyFont.ufo --keep top --keep bottom
///   anchor-dropper dedupe MyFont.ufo --name top
///   anchor-dropper rules import latin.glyphConstruction --mode additive
///   anchor-dropper --new-config
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "anchor-dropper",
    version,
    about = "Drop mark-attachment anchors into UFO fonts",
    long_about = "anchor-dropper places named anchors into the glyphs of UFO fonts from a table of rules. Vertical positions come from font metrics; horizontal positions come from the glyph outline."
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Initialize user configuration directory with settings and rules
    ///
    /// This creates the ~/.config/anchor-dropper directory with:
    /// - settings.json: preferences such as overwrite
    /// - rules.json: the built-in rule table, ready to edit
    /// - logs/: daily log files
    #[clap(
        long = "new-config",
        global = true,
        help = "Initialize user config directory with settings and rules"
    )]
    pub new_config: bool,

    /// Log debug output
    #[clap(long, short = 'v', global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Drop anchors into fonts from the rule table
    Drop {
        /// UFO sources to modify
        #[clap(required = true)]
        fonts: Vec<PathBuf>,

        /// Use rules from this file instead of the persisted table
        /// (.anchorDropperSettings, .json or .glyphConstruction)
        #[clap(long)]
        rules: Option<PathBuf>,

        /// Replace anchors that already exist
        #[clap(long, conflicts_with = "keep_existing")]
        overwrite: bool,

        /// Leave existing anchors alone
        #[clap(long)]
        keep_existing: bool,

        /// Report without saving
        #[clap(long)]
        dry_run: bool,
    },

    /// Remove anchors, keeping only the named ones
    Clear {
        #[clap(required = true)]
        fonts: Vec<PathBuf>,

        /// Anchor names to keep, with or without the mark prefix. Repeatable.
        #[clap(long = "keep", value_name = "NAME")]
        keep: Vec<String>,

        #[clap(long)]
        dry_run: bool,
    },

    /// Remove repeated anchors, keeping the first of each name
    Dedupe {
        #[clap(required = true)]
        fonts: Vec<PathBuf>,

        /// Limit to these anchor names. Repeatable.
        #[clap(long = "name", value_name = "NAME")]
        names: Vec<String>,

        #[clap(long)]
        dry_run: bool,
    },

    /// List the anchor names used in fonts
    Names {
        #[clap(required = true)]
        fonts: Vec<PathBuf>,
    },

    /// Inspect and edit the persisted rule table
    Rules {
        #[clap(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RulesAction {
    /// Print the rule table as JSON
    Show,

    /// Replace the rule table with the built-in one
    Reset,

    /// Write the rule table to a settings file
    Export {
        /// Destination; defaults to the font's file name or "settings"
        path: Option<PathBuf>,

        /// Name the default file after this UFO
        #[clap(long)]
        font: Option<PathBuf>,
    },

    /// Load rules from a settings or glyph construction file
    Import {
        path: PathBuf,

        #[clap(long, value_enum, default_value_t = ImportMode::Additive)]
        mode: ImportMode,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Replace the table
    Overwrite,
    /// Add rules the table does not already have
    Additive,
}

impl From<ImportMode> for MergeMode {
    fn from(mode: ImportMode) -> Self {
        match mode {
            ImportMode::Overwrite => MergeMode::Overwrite,
            ImportMode::Additive => MergeMode::Additive,
        }
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all font paths exist and are UFO directories before
    /// anything is loaded, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        for path in self.font_paths() {
            if !path.exists() {
                return Err(format!(
                    "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
            if !path.is_dir() {
                return Err(format!(
                    "Not a UFO directory: {}\nUFO sources are directories ending in .ufo.",
                    path.display()
                ));
            }
            let meta_info = path.join("metainfo.plist");
            if !meta_info.exists() {
                return Err(format!(
                    "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
                    path.display()
                ));
            }
        }
        Ok(())
    }

    /// Every UFO path named on the command line
    pub fn font_paths(&self) -> Vec<&PathBuf> {
        match &self.command {
            Some(Command::Drop { fonts, .. })
            | Some(Command::Clear { fonts, .. })
            | Some(Command::Dedupe { fonts, .. })
            | Some(Command::Names { fonts }) => fonts.iter().collect(),
            Some(Command::Rules {
                action: RulesAction::Export {
                    font: Some(font), ..
                },
            }) => vec![font],
            _ => Vec::new(),
        }
    }
}

/// Whether dropping replaces existing anchors
///
/// Priority order:
/// 1. CLI flag (--overwrite / --keep-existing)
/// 2. Config file setting (~/.config/anchor-dropper/settings.json)
/// 3. Built-in default (keep existing)
pub fn resolve_overwrite(overwrite: bool, keep_existing: bool, config: Option<&ConfigFile>) -> bool {
    if overwrite {
        debug!("Using overwrite from CLI");
        return true;
    }
    if keep_existing {
        debug!("Using keep-existing from CLI");
        return false;
    }
    if let Some(config) = config {
        debug!("Using overwrite from config file: {}", config.overwrite);
        return config.overwrite;
    }
    debug!("Using default: keep existing anchors");
    ConfigFile::default().overwrite
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn parses_drop_command() {
        let args = CliArgs::try_parse_from([
            "anchor-dropper",
            "drop",
            "A.ufo",
            "B.ufo",
            "--overwrite",
            "--dry-run",
        ])
        .expect("parse");
        match args.command {
            Some(Command::Drop {
                fonts,
                overwrite,
                keep_existing,
                dry_run,
                rules,
            }) => {
                assert_eq!(fonts, vec![PathBuf::from("A.ufo"), PathBuf::from("B.ufo")]);
                assert!(overwrite && dry_run && !keep_existing);
                assert_eq!(rules, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn overwrite_flags_conflict() {
        let result = CliArgs::try_parse_from([
            "anchor-dropper",
            "drop",
            "A.ufo",
            "--overwrite",
            "--keep-existing",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn drop_requires_a_font() {
        assert!(CliArgs::try_parse_from(["anchor-dropper", "drop"]).is_err());
    }

    #[test]
    fn parses_repeated_names_and_import_mode() {
        let args = CliArgs::try_parse_from([
            "anchor-dropper",
            "clear",
            "A.ufo",
            "--keep",
            "top",
            "--keep",
            "_bottom",
        ])
        .expect("parse");
        assert!(matches!(
            args.command,
            Some(Command::Clear { ref keep, .. }) if keep == &["top", "_bottom"]
        ));

        let args = CliArgs::try_parse_from(["anchor-dropper", "rules", "import", "latin.glyphConstruction"])
            .expect("parse");
        assert!(matches!(
            args.command,
            Some(Command::Rules {
                action: RulesAction::Import {
                    mode: ImportMode::Additive,
                    ..
                }
            })
        ));
    }

    #[test]
    fn new_config_needs_no_command() {
        let args = CliArgs::try_parse_from(["anchor-dropper", "--new-config"]).expect("parse");
        assert!(args.new_config);
        assert!(args.command.is_none());
    }

    #[test]
    fn validate_rejects_non_ufo_paths() {
        let dir = tempfile::tempdir().expect("temp dir");
        let ufo = dir.path().join("Test.ufo");
        std::fs::create_dir(&ufo).expect("mkdir");

        let args = CliArgs::try_parse_from([
            OsStr::new("anchor-dropper"),
            OsStr::new("names"),
            ufo.as_os_str(),
        ])
        .expect("parse");
        assert!(args.validate().is_err());

        std::fs::write(ufo.join("metainfo.plist"), "").expect("write");
        assert!(args.validate().is_ok());

        let missing = CliArgs::try_parse_from(["anchor-dropper", "names", "Missing.ufo"]).expect("parse");
        assert!(missing.validate().unwrap_err().contains("does not exist"));
    }

    #[test]
    fn overwrite_priority() {
        let config = ConfigFile {
            overwrite: true,
            ..ConfigFile::default()
        };
        assert!(resolve_overwrite(true, false, None));
        assert!(!resolve_overwrite(false, true, Some(&config)));
        assert!(resolve_overwrite(false, false, Some(&config)));
        assert!(!resolve_overwrite(false, false, None));
    }
}
