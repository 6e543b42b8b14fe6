use clap::{Parser, Subcommand};
use rk_core::units::m;
use rk_core::{PhysicsContributor, RecordingReporter, TracingReporter};
use rk_env::EnvironmentProvider;
use rk_project::{ProjectResult, VehicleDef, build_environment, build_rigid_body, load_yaml};
use rk_rotor::CalibrationTable;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rk-cli")]
#[command(about = "RotorKit CLI - rotor actuator force and torque simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate vehicle file syntax and structure
    Validate {
        /// Path to the vehicle YAML file
        vehicle_path: PathBuf,
    },
    /// Print a calibration table
    Table {
        /// Vehicle YAML file whose tables to print (defaults to the reference table)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Print the table as YAML instead of columns
        #[arg(long)]
        yaml: bool,
    },
    /// Step every rotor of a vehicle at a fixed throttle
    Simulate {
        /// Path to the vehicle YAML file
        vehicle_path: PathBuf,
        /// Time step in seconds
        #[arg(long)]
        dt: f64,
        /// Number of steps
        #[arg(long)]
        steps: u64,
        /// Control signal in [0, 1], clamped
        #[arg(long)]
        throttle: f64,
        /// Override the vehicle altitude in meters
        #[arg(long)]
        altitude: Option<f64>,
        /// Log the full report every N steps (0 logs only the final step)
        #[arg(long, default_value_t = 0)]
        report_every: u64,
        /// Output CSV file of per-step reports
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> ProjectResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { vehicle_path } => cmd_validate(&vehicle_path),
        Commands::Table { path, yaml } => cmd_table(path.as_deref(), yaml),
        Commands::Simulate {
            vehicle_path,
            dt,
            steps,
            throttle,
            altitude,
            report_every,
            csv,
        } => cmd_simulate(
            &vehicle_path,
            SimulateOptions {
                dt,
                steps,
                throttle,
                altitude,
                report_every,
            },
            csv.as_deref(),
        ),
    }
}

fn cmd_validate(vehicle_path: &Path) -> ProjectResult<()> {
    println!("Validating vehicle: {}", vehicle_path.display());
    let vehicle = load_yaml(vehicle_path)?;
    println!("✓ Vehicle '{}' is valid", vehicle.name);
    println!("  Rotors: {}", vehicle.rotors.len());
    for rotor in &vehicle.rotors {
        println!(
            "  {} at {:?} normal {:?} ({:?})",
            rotor.id, rotor.position_m, rotor.normal, rotor.spin
        );
    }
    Ok(())
}

fn cmd_table(path: Option<&Path>, yaml: bool) -> ProjectResult<()> {
    let Some(path) = path else {
        return print_table(&CalibrationTable::reference(), yaml);
    };

    let vehicle = load_yaml(path)?;
    print_table(&vehicle.calibration.resolve(), yaml)?;
    for rotor in &vehicle.rotors {
        if let Some(calibration) = &rotor.calibration {
            println!("\nOverride for rotor '{}':", rotor.id);
            print_table(&calibration.resolve(), yaml)?;
        }
    }
    Ok(())
}

fn print_table(table: &CalibrationTable, yaml: bool) -> ProjectResult<()> {
    if yaml {
        print!("{}", serde_yaml::to_string(table)?);
        return Ok(());
    }

    println!("Table '{}' v{} ({} entries)", table.name, table.version, table.len());
    println!("{:>5} {:>12} {:>18}", "index", "speed", "thrust_coefficient");
    for (i, entry) in table.entries.iter().enumerate() {
        println!(
            "{:>5} {:>12.3} {:>18.15}",
            i, entry.speed, entry.thrust_coefficient
        );
    }
    Ok(())
}

struct SimulateOptions {
    dt: f64,
    steps: u64,
    throttle: f64,
    altitude: Option<f64>,
    report_every: u64,
}

fn cmd_simulate(
    vehicle_path: &Path,
    options: SimulateOptions,
    csv_path: Option<&Path>,
) -> ProjectResult<()> {
    let vehicle: VehicleDef = load_yaml(vehicle_path)?;
    let environment = build_environment(&vehicle.environment)?;
    if let Some(altitude) = options.altitude {
        environment.set_altitude(m(altitude))?;
    }
    let mut body = build_rigid_body(&vehicle, &environment)?;

    println!("Simulating vehicle: {}", vehicle.name);
    println!(
        "  dt = {:.4} s, steps = {}, throttle = {:.3}, air density = {:.4} kg/m^3",
        options.dt,
        options.steps,
        options.throttle,
        environment.air_density().value
    );

    body.reset();
    for rotor in body.contributors_mut() {
        rotor.set_control_signal(options.throttle);
    }

    let mut recorder = RecordingReporter::new();
    let mut csv = String::new();
    let mut tracing_reporter = TracingReporter::new();

    for step in 1..=options.steps {
        let wrench = body.update(options.dt)?;
        tracing::debug!(
            step,
            fz = wrench.force.z,
            tz = wrench.torque.z,
            "body wrench"
        );

        if options.report_every > 0 && step % options.report_every == 0 {
            body.report(&mut tracing_reporter);
        }

        if csv_path.is_some() {
            recorder.clear();
            body.report(&mut recorder);
            if csv.is_empty() {
                csv.push_str("time_s,");
                csv.push_str(&recorder.csv_header());
                csv.push('\n');
            }
            csv.push_str(&format!("{},", step as f64 * options.dt));
            csv.push_str(&recorder.csv_row());
            csv.push('\n');
        }
    }
    body.report(&mut tracing_reporter);

    let wrench = body.wrench();
    println!("✓ Completed {} steps", body.steps());
    println!(
        "  Force  [N]:   ({:.6}, {:.6}, {:.6})",
        wrench.force.x, wrench.force.y, wrench.force.z
    );
    println!(
        "  Torque [N·m]: ({:.6}, {:.6}, {:.6})",
        wrench.torque.x, wrench.torque.y, wrench.torque.z
    );
    for rotor in body.contributors() {
        let out = rotor.output();
        println!(
            "  {}: speed {:.1}, thrust {:.4}, torque {:.4}",
            rotor.name(),
            out.speed,
            out.thrust,
            out.torque_scalar
        );
    }

    if let Some(path) = csv_path {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} steps to {}", options.steps, path.display());
    }

    Ok(())
}
