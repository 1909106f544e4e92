use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input};
use pomo_core::{Config, Translator, BREAK_MINUTES_RANGE, FOCUS_MINUTES_RANGE};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::get_translator;

#[derive(Debug, Serialize)]
struct InitConfig {
    timer: TimerSection,
    notifications: NotificationSection,
    audio: AudioSection,
}

#[derive(Debug, Serialize)]
struct TimerSection {
    focus_minutes: u32,
    break_minutes: u32,
}

#[derive(Debug, Serialize)]
struct NotificationSection {
    sound_enabled: bool,
    style: &'static str,
}

#[derive(Debug, Serialize)]
struct AudioSection {
    volume: f32,
}

pub fn execute(force: bool) -> Result<()> {
    let translator = get_translator();
    let config_path = Config::config_path();
    let path_display = config_path.display().to_string();

    if config_path.exists() && !force {
        bail!(
            "{}",
            translator.format("init.already_exists", &[("path", path_display.as_str())])
        );
    }

    if force && config_path.exists() {
        println!("{}\n", translator.get("init.overwriting"));
    }

    println!("{}\n", translator.get("init.welcome"));

    let config = prompt_configuration(&translator)?;
    write_config(&config_path, &config)?;

    println!(
        "\n{}",
        translator.format("init.saved", &[("path", path_display.as_str())])
    );
    println!("{}", translator.get("init.next_step"));

    Ok(())
}

fn prompt_configuration(translator: &Translator) -> Result<InitConfig> {
    let invalid_focus = translator.get("init.invalid_focus");
    let focus_minutes: u32 = Input::new()
        .with_prompt(translator.get("init.prompt_focus"))
        .default(25)
        .validate_with(|input: &u32| {
            if FOCUS_MINUTES_RANGE.contains(input) {
                Ok(())
            } else {
                Err(invalid_focus.clone())
            }
        })
        .interact_text()?;

    let invalid_break = translator.get("init.invalid_break");
    let break_minutes: u32 = Input::new()
        .with_prompt(translator.get("init.prompt_break"))
        .default(5)
        .validate_with(|input: &u32| {
            if BREAK_MINUTES_RANGE.contains(input) {
                Ok(())
            } else {
                Err(invalid_break.clone())
            }
        })
        .interact_text()?;

    let sound_enabled = Confirm::new()
        .with_prompt(translator.get("init.prompt_sound"))
        .default(true)
        .interact()?;

    let desktop = Confirm::new()
        .with_prompt(translator.get("init.prompt_desktop"))
        .default(true)
        .interact()?;

    let invalid_volume = translator.get("init.invalid_volume");
    let volume: f32 = Input::new()
        .with_prompt(translator.get("init.prompt_volume"))
        .default(0.3)
        .validate_with(|input: &f32| {
            if (0.0..=1.0).contains(input) {
                Ok(())
            } else {
                Err(invalid_volume.clone())
            }
        })
        .interact_text()?;

    Ok(InitConfig {
        timer: TimerSection {
            focus_minutes,
            break_minutes,
        },
        notifications: NotificationSection {
            sound_enabled,
            style: if desktop { "desktop" } else { "log" },
        },
        audio: AudioSection { volume },
    })
}

fn write_config(path: &Path, config: &InitConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create the configuration directory")?;
    }

    let toml_content = toml::to_string_pretty(config).context("failed to render configuration")?;
    fs::write(path, toml_content).context("failed to write the configuration file")?;

    Ok(())
}
