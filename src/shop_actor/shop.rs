use crate::framework::{Actor, Inbox, Mailbox, SimulationError};
use crate::model::{CapacityPolicy, Customer, Outcome, ShopReport, Visit};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Outbound mailboxes injected when the shop starts.
#[derive(Debug)]
pub struct ShopContext {
    pub barber: Mailbox<Visit>,
    pub world: Mailbox<Visit>,
}

/// Where the world stands in the closing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldState {
    Arriving,
    /// `Closing` received; the world should hang up next.
    Closing,
    /// The world dropped its mailbox after closing.
    Gone,
}

enum Inbound {
    World(Option<Visit>),
    Barber(Option<Visit>),
}

/// The barber's shop: seats, counters and the two-way select loop.
pub struct Shop {
    seats: usize,
    policy: CapacityPolicy,
    world_inbox: Inbox<Visit>,
    barber_inbox: Inbox<Visit>,
    seats_filled: usize,
    is_open: bool,
    world: WorldState,
    report: ShopReport,
}

impl Shop {
    pub fn new(
        seats: usize,
        policy: CapacityPolicy,
        world_inbox: Inbox<Visit>,
        barber_inbox: Inbox<Visit>,
    ) -> Self {
        Self {
            seats,
            policy,
            world_inbox,
            barber_inbox,
            seats_filled: 0,
            is_open: true,
            world: WorldState::Arriving,
            report: ShopReport {
                capacity: policy.effective_capacity(seats),
                ..ShopReport::default()
            },
        }
    }

    async fn on_arrival(&mut self, visit: Visit, ctx: &ShopContext) -> Result<(), SimulationError> {
        match visit {
            Visit::Closing => {
                debug!("World closing, passing on to barber");
                self.world = WorldState::Closing;
                ctx.barber.send(Visit::Closing).await
            }
            Visit::Customer(customer) if self.policy.admits(self.seats_filled, self.seats) => {
                self.seats_filled += 1;
                self.report.peak_seats_filled = self.report.peak_seats_filled.max(self.seats_filled);
                info!(customer = %customer.id(), seats_filled = self.seats_filled, "Customer takes a seat");
                ctx.barber.send(customer.into()).await
            }
            Visit::Customer(mut customer) => {
                customer.settle(Outcome::Rejected)?;
                self.report.turned_away += 1;
                info!(customer = %customer.id(), "Customer turned away");
                ctx.world.send(customer.into()).await
            }
        }
    }

    async fn on_trimmed(&mut self, customer: Customer, ctx: &ShopContext) -> Result<(), SimulationError> {
        if customer.outcome() != Outcome::Served {
            return Err(SimulationError::ProtocolViolation(format!(
                "{} came back from the barber as {:?}",
                customer.id(),
                customer.outcome()
            )));
        }
        self.seats_filled = self.seats_filled.checked_sub(1).ok_or_else(|| {
            SimulationError::ProtocolViolation(format!(
                "{} came back from the barber but no seat was filled",
                customer.id()
            ))
        })?;
        self.report.trimmed += 1;
        info!(customer = %customer.id(), "Customer leaving trimmed");
        ctx.world.send(customer.into()).await
    }

    fn check_barber_closing(&self) -> Result<(), SimulationError> {
        if self.world == WorldState::Arriving {
            return Err(SimulationError::ProtocolViolation(
                "barber closed before the world did".into(),
            ));
        }
        if self.seats_filled != 0 {
            return Err(SimulationError::ProtocolViolation(format!(
                "barber closed with {} customer(s) still seated",
                self.seats_filled
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Actor for Shop {
    const NAME: &'static str = "shop";

    type Context = ShopContext;
    type Report = ShopReport;

    async fn run(mut self, ctx: ShopContext) -> Result<ShopReport, SimulationError> {
        while self.is_open {
            let inbound = tokio::select! {
                visit = self.world_inbox.recv(), if self.world != WorldState::Gone => Inbound::World(visit),
                visit = self.barber_inbox.recv() => Inbound::Barber(visit),
            };

            match inbound {
                Inbound::World(Some(visit)) if self.world == WorldState::Arriving => {
                    self.on_arrival(visit, &ctx).await?;
                }
                Inbound::World(Some(late)) => {
                    warn!(?late, "Visit from the world after closing");
                    return Err(SimulationError::ProtocolViolation(format!(
                        "shop received {late:?} from the world after closing"
                    )));
                }
                Inbound::World(None) if self.world == WorldState::Closing => {
                    self.world = WorldState::Gone;
                }
                Inbound::World(None) => {
                    return Err(SimulationError::ChannelClosed { actor: "world" });
                }
                Inbound::Barber(Some(Visit::Customer(customer))) => {
                    self.on_trimmed(customer, &ctx).await?;
                }
                Inbound::Barber(Some(Visit::Closing)) => {
                    self.check_barber_closing()?;
                    self.is_open = false;
                }
                Inbound::Barber(None) => {
                    return Err(SimulationError::ChannelClosed { actor: "barber" });
                }
            }
        }

        info!(
            trimmed = self.report.trimmed,
            turned_away = self.report.turned_away,
            "Shop closing"
        );
        ctx.world.send(Visit::Closing).await?;
        Ok(self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockPeer;
    use crate::framework::spawn;
    use crate::model::CustomerId;

    fn ids(visits: &[Visit]) -> Vec<Option<CustomerId>> {
        visits
            .iter()
            .map(|v| match v {
                Visit::Customer(c) => Some(c.id()),
                Visit::Closing => None,
            })
            .collect()
    }

    /// A barber that never trims: everything admitted stays seated.
    #[tokio::test]
    async fn test_rejects_once_seats_are_full() {
        let (shop, mailboxes) = crate::shop_actor::new(2, CapacityPolicy::Strict);
        let barber = MockPeer::<Visit>::new("barber", 3);
        let world = MockPeer::<Visit>::new("world", 8);
        let handle = spawn(shop, ShopContext { barber: barber.mailbox(), world: world.mailbox() });

        for id in 0..4 {
            mailboxes.from_world.send(Visit::arrival(id)).await.unwrap();
        }
        mailboxes.from_world.send(Visit::Closing).await.unwrap();
        drop(mailboxes.from_world);
        barber.wait_for(3).await;

        // Play the barber: return both seated customers, then acknowledge.
        for id in 0..2 {
            let mut customer = Customer::new(id);
            customer.settle(Outcome::Served).unwrap();
            mailboxes.from_barber.send(Visit::Customer(customer)).await.unwrap();
        }
        mailboxes.from_barber.send(Visit::Closing).await.unwrap();

        let report = handle.join().await.unwrap();
        assert_eq!(report.trimmed, 2);
        assert_eq!(report.turned_away, 2);
        assert_eq!(report.peak_seats_filled, 2);
        assert_eq!(report.capacity, 2);

        let to_barber = barber.finish().await;
        assert_eq!(ids(&to_barber), vec![Some(CustomerId(0)), Some(CustomerId(1)), None]);

        let to_world = world.finish().await;
        assert_eq!(to_world.last(), Some(&Visit::Closing));
        let rejected: Vec<_> = to_world
            .iter()
            .filter_map(|v| match v {
                Visit::Customer(c) if c.outcome() == Outcome::Rejected => Some(c.id()),
                _ => None,
            })
            .collect();
        assert_eq!(rejected, vec![CustomerId(2), CustomerId(3)]);
        assert_eq!(to_world.len(), 5);
    }

    #[tokio::test]
    async fn test_permissive_policy_seats_one_extra() {
        let (shop, mailboxes) = crate::shop_actor::new(2, CapacityPolicy::Permissive);
        let barber = MockPeer::<Visit>::new("barber", 4);
        let world = MockPeer::<Visit>::new("world", 8);
        let handle = spawn(shop, ShopContext { barber: barber.mailbox(), world: world.mailbox() });

        for id in 0..4 {
            mailboxes.from_world.send(Visit::arrival(id)).await.unwrap();
        }
        mailboxes.from_world.send(Visit::Closing).await.unwrap();
        barber.wait_for(4).await;
        for id in 0..3 {
            let mut customer = Customer::new(id);
            customer.settle(Outcome::Served).unwrap();
            mailboxes.from_barber.send(Visit::Customer(customer)).await.unwrap();
        }
        mailboxes.from_barber.send(Visit::Closing).await.unwrap();

        let report = handle.join().await.unwrap();
        assert_eq!((report.trimmed, report.turned_away), (3, 1));
        assert_eq!(report.peak_seats_filled, 3);
        assert_eq!(report.capacity, 3);
        assert_eq!(barber.finish().await.len(), 4);
        drop(world);
    }

    #[tokio::test]
    async fn test_closing_from_the_barber_first_is_a_protocol_violation() {
        let (shop, mailboxes) = crate::shop_actor::new(1, CapacityPolicy::Strict);
        let barber = MockPeer::<Visit>::new("barber", 2);
        let world = MockPeer::<Visit>::new("world", 2);
        let handle = spawn(shop, ShopContext { barber: barber.mailbox(), world: world.mailbox() });

        mailboxes.from_barber.send(Visit::Closing).await.unwrap();

        let err = handle.join().await.unwrap_err();
        assert!(matches!(err, SimulationError::ProtocolViolation(_)), "{err}");
        drop(mailboxes);
    }

    #[tokio::test]
    async fn test_unserved_customer_from_the_barber_is_a_protocol_violation() {
        let (shop, mailboxes) = crate::shop_actor::new(1, CapacityPolicy::Strict);
        let barber = MockPeer::<Visit>::new("barber", 2);
        let world = MockPeer::<Visit>::new("world", 2);
        let handle = spawn(shop, ShopContext { barber: barber.mailbox(), world: world.mailbox() });

        mailboxes.from_world.send(Visit::arrival(0)).await.unwrap();
        mailboxes.from_barber.send(Visit::arrival(0)).await.unwrap();

        let err = handle.join().await.unwrap_err();
        assert!(matches!(err, SimulationError::ProtocolViolation(_)), "{err}");
        drop(mailboxes);
    }

    #[tokio::test]
    async fn test_world_vanishing_mid_run_is_reported() {
        let (shop, mailboxes) = crate::shop_actor::new(1, CapacityPolicy::Strict);
        let barber = MockPeer::<Visit>::new("barber", 2);
        let world = MockPeer::<Visit>::new("world", 2);
        let handle = spawn(shop, ShopContext { barber: barber.mailbox(), world: world.mailbox() });

        drop(mailboxes.from_world);
        let err = handle.join().await.unwrap_err();
        assert_eq!(err, SimulationError::ChannelClosed { actor: "world" });
    }
}
