// https://docs.rs/clap-serde/latest/clap_serde/#
// https://stackoverflow.com/questions/55133351/is-there-a-way-to-get-clap-to-use-default-values-from-a-file
use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Headless runner for the boids flocking simulation.
pub struct Args {
    /// Config file, YAML unless the name ends with `.toml`
    #[arg(short, long = "config", default_value = "config.toml")]
    pub config_path: std::path::PathBuf,

    /// Seed for the initial placement, random when left out
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the sampled boid data as YAML once the run is over
    #[arg(long)]
    pub dump: bool,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(256)]
    #[arg(short = 'n', long)]
    /// number of boids
    pub no_boids: usize,

    #[default(600)]
    #[arg(short = 'f', long)]
    /// number of frames to run
    pub frames: u64,

    #[default(1.)]
    #[arg(short = 'd', long)]
    /// elapsed time handed to every frame
    pub delta: f64,

    #[default(60)]
    #[arg(short = 'r', long)]
    /// sample every n-th frame
    pub sample_rate: u64,

    #[default(120)]
    #[arg(long = "report_every")]
    /// log a flock summary every n-th frame, 0 turns it off
    pub report_every: u64,

    #[default(1350)]
    #[arg(short = 'x', long)]
    pub init_width: u32,

    #[default(900)]
    #[arg(short = 'y', long)]
    pub init_height: u32,

    #[default(50.)]
    #[arg(long = "vision")]
    pub vision_rad: f64,
    #[default(6.)]
    #[arg(long = "max_speed")]
    pub max_speed: f64,

    #[default(0.25)]
    #[arg(long = "contain_force")]
    pub contain_force: f64,
    #[default(25.)]
    #[arg(long = "contain_padding")]
    pub contain_padding: f64,
    #[default(1.)]
    #[arg(long = "pull_force")]
    pub pull_force: f64,
    #[default(0.000025)]
    #[arg(long = "center_force")]
    pub center_force: f64,

    #[default(0.1)]
    #[arg(long = "ali_force")]
    pub align_force: f64,
    #[default(0.02)]
    #[arg(long = "coh_force")]
    pub cohesion_force: f64,
    #[default(0.04)]
    #[arg(long = "sep_force")]
    pub separation_force: f64,

    #[default(false)]
    #[arg(long = "snapshot")]
    /// steer every boid against the frame-start state
    pub snapshot: bool,
    #[default(false)]
    #[arg(long = "guard")]
    /// zero out degenerate normalizations instead of propagating NaN
    pub numeric_guard: bool,
    #[default(false)]
    #[arg(long = "accumulate")]
    /// carry acceleration over between frames
    pub accumulate_acceleration: bool,
}
