//! Command runner
//!
//! Loads fonts, runs one engine operation, prints its report and saves what
//! changed.

use crate::anchors::{
    self, default_table, import::SETTINGS_EXTENSION, load_settings_file, DropSummary, RuleTable,
};
use crate::core::cli::{resolve_overwrite, CliArgs, Command, ImportMode, RulesAction};
use crate::core::config_file::ConfigFile;
use crate::font_source::{DefaultNameResolver, FontNameResolver, UfoFont};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_SETTINGS_STEM: &str = "settings";

/// Run the command described by the CLI arguments.
pub fn run(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        ConfigFile::initialize_config_directory()?;
        if cli_args.command.is_none() {
            return Ok(());
        }
    }

    cli_args.validate().map_err(anyhow::Error::msg)?;

    let config = ConfigFile::load();
    let settings = config.clone().unwrap_or_default();

    let Some(command) = cli_args.command else {
        bail!("no command given");
    };

    match command {
        Command::Drop {
            fonts,
            rules,
            overwrite,
            keep_existing,
            dry_run,
        } => {
            let mut fonts = load_fonts(&fonts)?;
            let table = match rules {
                Some(path) => rules_from_file(&path, &fonts)?,
                None => settings.load_rule_table(),
            };
            if table.is_empty() {
                println!("No anchor rules to apply.");
                return Ok(());
            }
            let overwrite = resolve_overwrite(overwrite, keep_existing, config.as_ref());
            let reports = anchors::apply(&mut fonts, &table, overwrite, &settings.placement_options())?;
            print!("{}", DropSummary(&reports));
            save_changed(&mut fonts, dry_run)
        }
        Command::Clear {
            fonts,
            keep,
            dry_run,
        } => {
            let mut fonts = load_fonts(&fonts)?;
            let report = anchors::remove_by_name(&mut fonts, &keep)?;
            print!("{report}");
            save_changed(&mut fonts, dry_run)
        }
        Command::Dedupe {
            fonts,
            names,
            dry_run,
        } => {
            let mut fonts = load_fonts(&fonts)?;
            let report = anchors::remove_duplicates(&mut fonts, &names)?;
            print!("{report}");
            save_changed(&mut fonts, dry_run)
        }
        Command::Names { fonts } => {
            let fonts = load_fonts(&fonts)?;
            for name in anchors::anchor_names(&fonts) {
                println!("{name}");
            }
            Ok(())
        }
        Command::Rules { action } => run_rules(action, &settings),
    }
}

fn run_rules(action: RulesAction, settings: &ConfigFile) -> Result<()> {
    match action {
        RulesAction::Show => {
            println!("{}", settings.load_rule_table().to_json_string()?);
            Ok(())
        }
        RulesAction::Reset => {
            settings.save_rule_table(&default_table())?;
            println!("Rule table reset to defaults: {:?}", settings.rules_path());
            Ok(())
        }
        RulesAction::Export { path, font } => {
            let font_stem = match font {
                Some(font) => UfoFont::load(&font)?.file_stem(),
                None => None,
            };
            let path = export_path(path, font_stem.as_deref());
            settings.load_rule_table().save(&path)?;
            println!("Exported rule table to {:?}", path);
            Ok(())
        }
        RulesAction::Import { path, mode } => {
            let imported = load_settings_file(&path, &DefaultNameResolver)?;
            let Some(merged) = import_into(&settings.load_rule_table(), &imported, mode) else {
                println!("Nothing to import from {:?}", path);
                return Ok(());
            };
            settings.save_rule_table(&merged)?;
            info!(
                "Imported {} rules from {:?}; table now has {} rules",
                imported.rule_count(),
                path,
                merged.rule_count()
            );
            Ok(())
        }
    }
}

/// The table to store after an import, or `None` when the import brought no
/// rules. An empty import never clears the table, even in overwrite mode.
fn import_into(existing: &RuleTable, imported: &RuleTable, mode: ImportMode) -> Option<RuleTable> {
    if imported.is_empty() {
        return None;
    }
    Some(existing.merged_with(imported, mode.into()))
}

fn load_fonts(paths: &[PathBuf]) -> Result<Vec<UfoFont>> {
    paths.iter().map(|path| UfoFont::load(path)).collect()
}

/// Rules from a file named on the command line. Construction files are
/// classified against the first font's codepoints.
fn rules_from_file(path: &Path, fonts: &[UfoFont]) -> Result<RuleTable> {
    match fonts.first() {
        Some(font) => load_settings_file(path, &FontNameResolver::from_norad_font(font.font())),
        None => load_settings_file(path, &DefaultNameResolver),
    }
}

fn save_changed(fonts: &mut [UfoFont], dry_run: bool) -> Result<()> {
    for font in fonts.iter_mut().filter(|font| font.is_changed()) {
        if dry_run {
            debug!("Dry run: not saving {:?}", font.path());
            continue;
        }
        font.save()?;
        info!("Saved {:?}", font.path());
    }
    if dry_run {
        println!("Dry run: no fonts were saved.");
    }
    Ok(())
}

/// Where to export the rule table.
///
/// Without a path the file is named after the font, or "settings", in the
/// current directory. The settings extension is added when missing.
pub fn export_path(path: Option<PathBuf>, font_stem: Option<&str>) -> PathBuf {
    let path = path.unwrap_or_else(|| {
        PathBuf::from(font_stem.unwrap_or(DEFAULT_SETTINGS_STEM))
    });
    match path.extension() {
        Some(extension) if extension == SETTINGS_EXTENSION || extension == "json" => path,
        _ => {
            let mut file_name = path.as_os_str().to_owned();
            file_name.push(".");
            file_name.push(SETTINGS_EXTENSION);
            PathBuf::from(file_name)
        }
    }
}
