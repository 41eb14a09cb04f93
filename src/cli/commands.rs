//! Subcommand handlers and the conversion entry point.

use std::error::Error;
use std::path::Path;

use super::args::{Args, ConfigAction};
use crate::ascii::{CharSet, OutputFormat, RenderPlan};
use crate::config::{default_path, Config, DEFAULT_CONFIG};
use crate::error::ConvertError;
use crate::pipeline::Pipeline;
use crate::settings::{SettingUpdate, Settings};

/// Build the effective settings: defaults, then the config file, then flags.
///
/// When `--mode` picks a mode the configured charset cannot render and no
/// `--charset` is given, the mode's own charset is used instead.
pub fn build_settings(args: &Args, config: &Config) -> Result<Settings, ConvertError> {
    let mut settings = Settings::default();
    config.apply_to(&mut settings)?;

    let mut updates = Vec::new();
    if args.keep_aspect {
        updates.push(SettingUpdate::MaintainAspectRatio(true));
    }
    if let Some(width) = args.width {
        updates.push(SettingUpdate::OutputWidth(width));
    }
    if let Some(height) = args.height {
        updates.push(SettingUpdate::OutputHeight(height));
    }
    if let Some(factor) = args.contrast {
        updates.push(SettingUpdate::ContrastFactor(factor));
    }
    if args.reverse {
        updates.push(SettingUpdate::ReverseIntensity(true));
    }
    if let Some(mode) = args.mode {
        updates.push(SettingUpdate::Mode(mode.into()));
    }
    if let Some(charset) = args.charset {
        updates.push(SettingUpdate::CharSet(charset.into()));
    }
    if let Some(radius) = args.blur_radius {
        updates.push(SettingUpdate::BlurRadius(radius));
    }
    if let Some(threshold) = args.edge_threshold {
        updates.push(SettingUpdate::EdgeThreshold(threshold));
    }
    if let Some(levels) = args.braille_levels {
        updates.push(SettingUpdate::BrailleLevels(levels.into()));
    }
    for update in updates {
        settings.apply(update, None)?;
    }

    if args.mode.is_some() && args.charset.is_none() {
        let supported = RenderPlan::resolve(
            settings.mode,
            settings.charset,
            settings.reverse_intensity,
            settings.braille_levels,
        )
        .is_ok();
        if !supported {
            let charset: CharSet = settings.mode.default_charset();
            log::debug!("Mode {} implies charset {}", settings.mode, charset);
            settings.apply(SettingUpdate::CharSet(charset), None)?;
        }
    }

    Ok(settings)
}

/// Load, render and write one image as the flags describe.
pub async fn convert(args: &Args) -> Result<(), Box<dyn Error>> {
    let input = args
        .input
        .as_deref()
        .ok_or(ConvertError::NoSource)?;
    let config = Config::load(args.config.as_deref())?;
    let settings = build_settings(args, &config)?;

    let mut pipeline = Pipeline::new(settings)?;
    pipeline.load_image(input).await?;
    let grid = pipeline.render()?;
    let format: OutputFormat = args.format.into();
    let mut rendered = grid.encode(format)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            log::info!("Wrote {} rows to {}", grid.row_count(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    path: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            let mut settings = Settings::default();
            config.apply_to(&mut settings)?;

            println!("Current configuration:");
            println!("  Width: {}", settings.output_width);
            println!("  Height: {}", settings.output_height);
            println!(
                "  Keep aspect: {}",
                if settings.maintain_aspect_ratio { "yes" } else { "no" }
            );
            println!("  Mode: {}", settings.mode);
            println!("  Charset: {}", settings.charset);
            println!("  Contrast: {}", settings.contrast_factor);
            println!(
                "  Reverse: {}",
                if settings.reverse_intensity { "yes" } else { "no" }
            );
            println!("  Blur radius: {}", settings.blur_radius);
            println!("  Edge threshold: {}", settings.edge_threshold);
            println!("  Braille levels: {}", settings.braille_levels.count());
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            init_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

/// Write the default config file, refusing to overwrite an existing one.
pub fn init_config(path: &Path) -> Result<(), Box<dyn Error>> {
    if path.exists() {
        return Err(format!(
            "Config file already exists: {} (use 'glyphcast config show' to view it)",
            path.display()
        )
        .into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}
