//! Generate a sample sensor-readings CSV for trying the viewer out.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sensorscope::{INDEX_COLUMN, TIMESTEP_COLUMN, VALUE_COLUMN};

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Generate a sample Index,Timestep,Value CSV of sensor readings")]
struct Args {
    /// Output CSV file path
    #[arg(default_value = "sample_data.csv")]
    output: PathBuf,

    /// Number of sensors (Index values 0..N)
    #[arg(short, long, default_value = "3")]
    sensors: usize,

    /// Readings per sensor
    #[arg(short, long, default_value = "50")]
    timesteps: usize,

    /// Seed for the deterministic generator
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let sites = ["roof", "basement", "yard"];

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record([INDEX_COLUMN, TIMESTEP_COLUMN, VALUE_COLUMN, "Site"])
        .context("writing header")?;

    // Each sensor: its own baseline and daily swing, plus gaussian noise.
    for sensor in 0..args.sensors {
        let baseline = 15.0 + sensor as f64 * 5.0;
        let amplitude = 2.0 + sensor as f64;
        let site = sites[sensor % sites.len()];

        for t in 0..args.timesteps {
            let phase = t as f64 / args.timesteps.max(1) as f64 * std::f64::consts::TAU;
            let value = baseline + amplitude * phase.sin() + rng.gauss(0.0, 0.3);
            writer
                .write_record([
                    sensor.to_string(),
                    (t + 1).to_string(),
                    format!("{value:.3}"),
                    site.to_string(),
                ])
                .context("writing row")?;
        }
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {} readings ({} sensors x {} timesteps) to {}",
        args.sensors * args.timesteps,
        args.sensors,
        args.timesteps,
        args.output.display()
    );
    Ok(())
}
