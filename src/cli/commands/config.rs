//! Config file inspection.

use crate::config::{self, Config};

/// Print the config path and the values in effect, or write the defaults
pub fn cmd_config(init: bool) -> anyhow::Result<()> {
    if init {
        let path = config::save(&Config::default())?;
        println!("Wrote default config to {:?}", path);
        return Ok(());
    }

    match config::config_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not present, showing defaults)", path.display()),
        None => println!("# no config directory on this platform, showing defaults"),
    }
    print!("{}", toml::to_string_pretty(&config::load())?);

    Ok(())
}
