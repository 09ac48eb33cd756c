use anyhow::Result;
use evtrack_core::config::TrackerConfig;
use owo_colors::OwoColorize;

pub fn run(config: &TrackerConfig, save: bool) -> Result<()> {
    let config_path = TrackerConfig::config_path()?;
    let storage = config.storage();

    if save {
        config.save(&config_path)?;
        println!("{} {}", "Saved".green(), config_path.display());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!("  Events:  {}", storage.path().display());
    println!();
    println!("{}", "Server".bold());
    println!("  Port:    {}", config.server_port);

    Ok(())
}
