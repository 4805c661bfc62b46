use std::{fs, path::Path};

use anyhow::Context;
use boids_lib::birdwatcher::{Birdwatcher, FlockSummary};
use boids_lib::options::{self, BoidSettings, RunOptions, UpdateMode};
use boids_lib::simulation::Simulation;
use clap_serde_derive::{clap::Parser, ClapSerde};
use log::info;

mod cliargs;
use cliargs::{Args, Config};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse whole args with clap
    let mut args = Args::parse();
    let config = load_config(&mut args)?;

    let run_options = to_run_options(&config, args.seed);
    run_options
        .validate()
        .context("invalid simulation configuration")?;

    let mut simulation = Simulation::new(&run_options);
    let mut bird_watcher = Birdwatcher::new(run_options.sample_rate);

    info!(
        "running {} boids for {} frames ({:?})",
        simulation.len(),
        config.frames,
        run_options.update_mode
    );

    for _ in 0..config.frames {
        simulation.update_boids(config.delta);
        bird_watcher.watch(&simulation);

        if config.report_every > 0 && simulation.frame() % config.report_every == 0 {
            info!("{:?}", FlockSummary::of(&simulation));
        }
    }

    let summary = FlockSummary::of(&simulation);
    if summary.non_finite > 0 {
        log::warn!("{} boids ended up with non-finite state", summary.non_finite);
    }
    print!("{}", serde_yaml::to_string(&summary)?);

    if args.dump {
        print!("{}", serde_yaml::to_string(&bird_watcher.pop_data())?);
    }

    Ok(())
}

/// Merges the config file, if there is one, with whatever was given on the command line.
fn load_config(args: &mut Args) -> anyhow::Result<Config> {
    let path = args.config_path.clone();

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        // If there is not config file return only config parsed from clap
        Err(_) => return Ok(Config::from(&mut args.config)),
    };

    let from_file = parse_config(&path, &contents)
        .with_context(|| format!("error in configuration file {}", path.display()))?;

    // merge config already parsed from clap
    Ok(Config::from(from_file).merge(&mut args.config))
}

fn parse_config(path: &Path, contents: &str) -> anyhow::Result<<Config as ClapSerde>::Opt> {
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        Ok(toml::from_str(contents)?)
    } else {
        Ok(serde_yaml::from_str(contents)?)
    }
}

fn to_run_options(config: &Config, seed: Option<u64>) -> RunOptions {
    let settings = BoidSettings {
        vision_rad: config.vision_rad,
        max_speed: config.max_speed,
        contain_force: config.contain_force,
        contain_padding: config.contain_padding,
        pull_force: config.pull_force,
        center_force: config.center_force,
        align_force: config.align_force,
        cohesion_force: config.cohesion_force,
        separation_force: config.separation_force,
        ..Default::default()
    };

    RunOptions {
        init_boids: config.no_boids,
        window: options::get_window_size(config.init_width, config.init_height),
        settings,
        seed,
        update_mode: if config.snapshot {
            UpdateMode::Snapshot
        } else {
            UpdateMode::Sequential
        },
        numeric_guard: config.numeric_guard,
        accumulate_acceleration: config.accumulate_acceleration,
        sample_rate: config.sample_rate,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap_serde_derive::ClapSerde;

    use super::{parse_config, to_run_options};
    use crate::cliargs::Config;
    use boids_lib::options::UpdateMode;

    #[test]
    fn reads_toml_and_yaml() {
        let toml = parse_config(Path::new("boids.toml"), "no_boids = 12\nmax_speed = 3.5\n").unwrap();
        let config = Config::from(toml);
        assert_eq!(config.no_boids, 12);
        assert_eq!(config.max_speed, 3.5);
        assert_eq!(config.frames, 600);

        let yaml = parse_config(Path::new("boids.yaml"), "snapshot: true\nsample_rate: 5\n").unwrap();
        let config = Config::from(yaml);
        assert!(config.snapshot);
        assert_eq!(config.sample_rate, 5);
    }

    #[test]
    fn broken_config_is_an_error() {
        assert!(parse_config(Path::new("boids.toml"), "no_boids = \"many\"").is_err());
    }

    #[test]
    fn config_maps_onto_run_options() {
        let yaml = parse_config(Path::new("c.yml"), "snapshot: true\nvision_rad: 30.0\n").unwrap();
        let ro = to_run_options(&Config::from(yaml), Some(4));

        assert_eq!(ro.update_mode, UpdateMode::Snapshot);
        assert_eq!(ro.settings.vision_rad, 30.);
        assert_eq!(ro.seed, Some(4));
        assert_eq!(ro.window.width, 1350.);
        assert!(ro.validate().is_ok());
    }
}
