//! Command-line entry point: one simulated day with the given parameters.

use clap::Parser;
use sleeping_barber::lifecycle::{run_simulation, setup_tracing, SimulationConfig};
use sleeping_barber::model::DelayRange;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sleeping barber simulation", long_about = None)]
struct Args {
    /// Number of customers the world sends to the shop
    #[arg(long, default_value_t = 20)]
    customers: usize,

    /// Number of waiting seats in the shop
    #[arg(long, default_value_t = 4)]
    seats: usize,

    /// Milliseconds between arrivals, as MIN..MAX or a single value
    #[arg(long, default_value = "1..3")]
    arrival_delay: DelayRange,

    /// Milliseconds per trim, as MIN..MAX or a single value
    #[arg(long, default_value = "1..7")]
    service_duration: DelayRange,
}

impl From<Args> for SimulationConfig {
    fn from(args: Args) -> Self {
        SimulationConfig::new(args.customers, args.seats)
            .with_arrival_delay(args.arrival_delay)
            .with_service_duration(args.service_duration)
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = SimulationConfig::from(Args::parse());
    setup_tracing();

    let report = run_simulation(&config).await.map_err(|e| e.to_string())?;

    info!(
        served = report.served(),
        rejected = report.rejected(),
        peak_seats_filled = report.shop.peak_seats_filled,
        "Day over"
    );
    println!(
        "Trimmed {} and turned away {} of {} customers.",
        report.served(),
        report.rejected(),
        report.total()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_library_defaults() {
        let args = Args::try_parse_from(["sleeping-barber"]).unwrap();
        assert_eq!(SimulationConfig::from(args), SimulationConfig::default());
    }

    #[test]
    fn test_all_four_options_parse() {
        let args = Args::try_parse_from([
            "sleeping-barber",
            "--customers",
            "7",
            "--seats",
            "2",
            "--arrival-delay",
            "0..4",
            "--service-duration",
            "5",
        ])
        .unwrap();
        let config = SimulationConfig::from(args);

        assert_eq!((config.customers, config.seats), (7, 2));
        assert_eq!(config.arrival_delay, DelayRange { min_ms: 0, max_ms: 4 });
        assert_eq!(config.service_duration, DelayRange::fixed(5));
    }

    #[test]
    fn test_negative_and_malformed_values_are_rejected() {
        for bad in [
            ["sleeping-barber", "--seats", "-1"],
            ["sleeping-barber", "--customers", "-3"],
            ["sleeping-barber", "--arrival-delay", "5..2"],
            ["sleeping-barber", "--service-duration", "-1..2"],
        ] {
            assert!(Args::try_parse_from(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_only_the_four_options_exist() {
        assert!(Args::try_parse_from(["sleeping-barber", "--capacity-policy", "strict"]).is_err());
    }
}
