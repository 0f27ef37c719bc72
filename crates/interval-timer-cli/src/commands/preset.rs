use clap::Subcommand;
use interval_timer_core::storage::PRESET_SLOTS;
use interval_timer_core::Settings;

#[derive(Subcommand)]
pub enum PresetAction {
    /// Save the current durations into a slot (1-3)
    Save { slot: usize },
    /// Load a slot into the current durations
    Load { slot: usize },
    /// Show what a slot contains
    Show { slot: usize },
    /// Summarize every slot
    List,
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::load()?;
    match action {
        PresetAction::Save { slot } => {
            settings.save_preset(slot)?;
            settings.save()?;
            println!("Preset {slot} saved!");
        }
        PresetAction::Load { slot } => {
            settings.load_preset(slot)?;
            settings.save()?;
            println!("Preset {slot} loaded!");
        }
        PresetAction::Show { slot } => {
            println!("{}", settings.preset_summary(slot)?);
        }
        PresetAction::List => {
            for slot in 1..=PRESET_SLOTS {
                let summary = settings.preset_summary(slot)?.replace('\n', ", ");
                println!("Preset {slot}: {summary}");
            }
        }
    }
    Ok(())
}
