use azimuth::Azimuth;
use clap::Parser;
use compass::config;
use compass::gui::app::{AppInit, AppModel};
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compass", version, about, long_about = None)]
struct Args {
    /// Read settings from this file instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Start without the guided tour
    #[arg(long)]
    skip_tour: bool,

    /// Initial azimuth in degrees (overrides the config file)
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    azimuth: Option<f64>,

    /// Write the default config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(args.config.as_deref());
    let azimuth = Azimuth::new(args.azimuth.unwrap_or(config.initial_azimuth));

    let tour = if config.show_tour && !args.skip_tour {
        match config.tour() {
            Ok(tour) => Some(tour),
            Err(e) => {
                log::warn!("Tour disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    log::info!("Starting at {} with tour {}", azimuth, if tour.is_some() { "on" } else { "off" });

    // GTK must not see our own flags
    let app = RelmApp::new("org.azimuth.compass").with_args(Vec::new());
    app.run::<AppModel>(AppInit { azimuth, tour });
    Ok(())
}
