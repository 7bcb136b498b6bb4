use clap::Parser;
use ocean_sim_core::{OceanConfig, OceanSimulation, Vec3, NUM_CASCADES};

/// Ocean surface demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "ocean-demo")]
#[command(about = "FFT ocean surface simulation demo", long_about = None)]
struct Args {
    /// Simulated duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f32,

    /// Frame time step in seconds
    #[arg(long, default_value_t = 1.0 / 30.0)]
    time_step: f32,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 44.0)]
    wind_speed: f32,

    /// Wind direction in degrees (0 = +Y, 90 = +X)
    #[arg(long, default_value_t = 90.0)]
    wind_direction: f32,

    /// X coordinate of the probe point, world units
    #[arg(short, long, default_value_t = 500.0)]
    x: f32,

    /// Y coordinate of the probe point, world units
    #[arg(short, long, default_value_t = 500.0)]
    y: f32,

    /// Report interval in seconds
    #[arg(short, long, default_value_t = 1.0)]
    report_interval: f32,

    /// Print a 10x10 height grid around the probe point at the end
    #[arg(short, long)]
    grid: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Ocean Surface Simulation Demo ===\n");

    let config = OceanConfig {
        wind_speed: args.wind_speed,
        wind_direction: args.wind_direction,
        ..OceanConfig::default()
    };
    println!(
        "Grid: {0}x{0}, {1} cascades, {2} batches",
        config.grid_size, NUM_CASCADES, config.batch_count
    );
    println!(
        "Wind: {:.1} m/s at {:.0} deg, repeat period {:.0} s",
        config.wind_speed, config.wind_direction, config.repeat_period
    );
    println!(
        "Cascade patches: {:?} m\n",
        config
            .cascades
            .iter()
            .map(|c| c.patch_length)
            .collect::<Vec<_>>()
    );

    let mut sim = OceanSimulation::new(config);
    sim.initialize();

    let probe = Vec3::new(args.x, args.y, 0.0);
    println!(
        "Probing displacement at ({:.0}, {:.0}):",
        probe.x, probe.y
    );

    let mut time = 0.0;
    let mut next_report = 0.0;
    let mut min_height = f32::MAX;
    let mut max_height = f32::MIN;

    while time <= args.duration {
        sim.calculate(time);
        let d = sim.displacement_at_point(probe);
        min_height = min_height.min(d.z);
        max_height = max_height.max(d.z);

        if time >= next_report {
            println!(
                "  t = {:6.2} s   dx = {:9.2}   dy = {:9.2}   height = {:9.2}",
                time, d.x, d.y, d.z
            );
            next_report += args.report_interval;
        }
        time += args.time_step;
    }

    println!(
        "\nFrames computed: {} ({} simulated seconds)",
        sim.frames_computed(),
        args.duration
    );
    println!("Probe height range: [{min_height:.2}, {max_height:.2}]");

    if args.grid {
        println!("\nHeight field around probe (world units):");
        for (i, (_, displacement)) in sim.debug_sample_grid(probe).iter().enumerate() {
            print!("{:9.1} ", displacement.z);
            if (i + 1) % 10 == 0 {
                println!();
            }
        }
    }
}
