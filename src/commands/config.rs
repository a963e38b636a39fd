use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalgridConfig) -> Result<()> {
    let config_path = CalgridConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.data_path().display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Overlap rule:  {:?}", config.overlap_rule);

    Ok(())
}
