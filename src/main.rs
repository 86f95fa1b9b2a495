use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pitbike_os::geo::format::{format_distance, format_duration};
use pitbike_os::geo::Coordinate;
use pitbike_os::geocode::GeocodeClient;
use pitbike_os::navigation::{plan_route, PlannedRoute};
use pitbike_os::routing::RouteClient;
use pitbike_os::web::{run_server, Config};

#[derive(Parser)]
#[command(name = "pitbike-os")]
#[command(about = "Dashboard and navigation backend for PITBIKΞ OS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard backend
    Serve {
        /// YAML configuration file; built-in defaults when omitted
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Geocode a destination and print the route to it
    Route {
        /// Origin as "lat,lon"
        #[arg(long)]
        from: String,
        #[arg(short, long)]
        config: Option<String>,
        /// Destination search text
        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Route {
            from,
            config,
            query,
        } => route(&from, config.as_deref(), &query.join(" ")).await,
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    let Some(path) = path else {
        return Some(Config::default());
    };
    match Config::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

async fn serve(config_path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    match run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn route(from: &str, config_path: Option<&str>, query: &str) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let origin = match Coordinate::from_coordinates(from) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid origin: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let geocoder = match GeocodeClient::new(
        &config.geocoding.endpoint,
        &config.app.identifier,
        config.geocoding.timeout,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error creating geocoding client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let planner = match RouteClient::new(
        &config.routing.endpoint,
        &config.app.identifier,
        config.routing.timeout,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error creating routing client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match plan_route(&geocoder, &planner, &origin, query).await {
        Ok(planned) => {
            print_route(&planned);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Route failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_route(planned: &PlannedRoute) {
    let plan = &planned.plan;
    println!("{}", planned.destination.label);
    println!(
        "{} · {} ({} points)",
        format_distance(plan.total_distance_meters()),
        format_duration(plan.total_duration_seconds()),
        plan.path().len()
    );
    for (i, step) in plan.steps().iter().enumerate() {
        println!(
            "  {:>2}. {} ({})",
            i + 1,
            step.instruction(),
            format_distance(step.distance_meters)
        );
    }
}
