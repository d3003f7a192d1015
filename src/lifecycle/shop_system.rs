use crate::framework::{spawn, ActorHandle, SimulationError};
use crate::lifecycle::SimulationConfig;
use crate::model::{BarberReport, DelaySource, ShopReport, SimulationReport, WorldReport};
use crate::shop_actor::ShopContext;
use tracing::{error, info};

/// The runtime orchestrator for one day at the barber's shop.
///
/// `BarberShopSystem` is responsible for:
/// - **Wiring**: creating the five channels (world → shop → barber → shop → world)
///   with the capacities the shutdown handshake relies on
/// - **Lifecycle**: spawning the three actors and waiting for all of them
/// - **Termination**: the world finishing is the signal that the day is over
///
/// # Example
///
/// ```ignore
/// let config = SimulationConfig::new(20, 4);
/// let system = BarberShopSystem::start(&config, FixedDelay::zero(), config.service_duration.source())?;
/// let report = system.run_to_completion().await?;
/// assert_eq!(report.total(), 20);
/// ```
pub struct BarberShopSystem {
    world: ActorHandle<WorldReport>,
    shop: ActorHandle<ShopReport>,
    barber: ActorHandle<BarberReport>,
}

impl BarberShopSystem {
    /// Validates `config`, then creates and starts all three actors.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(
        config: &SimulationConfig,
        arrival: impl DelaySource,
        service: impl DelaySource,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let customers = config.customer_count()?;
        info!(?config, "Opening the shop");

        // 1. Create actors; nobody needs a neighbour yet
        let (barber, to_barber) = crate::barber_actor::new(config.barber_queue_capacity(), service);
        let (shop, to_shop) = crate::shop_actor::new(config.seats, config.capacity_policy);
        let (world, to_world) = crate::world_actor::new(customers, arrival);

        // 2. Start actors with their outbound mailboxes injected.
        // Each mailbox is moved into exactly one actor, so every actor's inbox
        // closes as soon as its upstream neighbour stops.
        let barber = spawn(barber, to_shop.from_barber);
        let shop = spawn(
            shop,
            ShopContext {
                barber: to_barber,
                world: to_world,
            },
        );
        let world = spawn(world, to_shop.from_world);

        Ok(Self { world, shop, barber })
    }

    /// Waits for the day to end and collects every actor's report.
    ///
    /// The first error that is not merely a closed channel is returned, since a
    /// failing actor makes its neighbours see their channels close.
    pub async fn run_to_completion(self) -> Result<SimulationReport, SimulationError> {
        let world = self.world.join().await;
        let shop = self.shop.join().await;
        let barber = self.barber.join().await;

        match (world, shop, barber) {
            (Ok(world), Ok(shop), Ok(barber)) => {
                info!(served = world.served, rejected = world.rejected, "Shop closed");
                Ok(SimulationReport { world, shop, barber })
            }
            (world, shop, barber) => {
                let errors: Vec<SimulationError> = [world.err(), shop.err(), barber.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                for e in &errors {
                    error!(error = %e, "Simulation failed");
                }
                let root = errors
                    .iter()
                    .position(|e| !matches!(e, SimulationError::ChannelClosed { .. }))
                    .unwrap_or(0);
                Err(errors.into_iter().nth(root).unwrap_or_else(|| {
                    SimulationError::ProtocolViolation("run failed without an error".into())
                }))
            }
        }
    }
}

/// Runs one simulation with explicit delay sources.
pub async fn run_simulation_with(
    config: &SimulationConfig,
    arrival: impl DelaySource,
    service: impl DelaySource,
) -> Result<SimulationReport, SimulationError> {
    BarberShopSystem::start(config, arrival, service)?
        .run_to_completion()
        .await
}

/// Runs one simulation with uniform delays drawn from the configured ranges.
pub async fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, SimulationError> {
    run_simulation_with(
        config,
        config.arrival_delay.source(),
        config.service_duration.source(),
    )
    .await
}
