use crate::framework::{Actor, Inbox, Mailbox, SimulationError};
use crate::model::{CustomerId, DelaySource, Outcome, Visit, WorldReport};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Source of arrivals and sink of settled customers.
pub struct World {
    customers: u32,
    inbox: Inbox<Visit>,
    arrival: Box<dyn DelaySource>,
}

/// What the exit half collects.
#[derive(Debug, Default)]
struct Exits {
    served: usize,
    rejected: usize,
    outcomes: BTreeMap<CustomerId, Outcome>,
}

impl World {
    pub fn new(customers: u32, inbox: Inbox<Visit>, arrival: Box<dyn DelaySource>) -> Self {
        Self {
            customers,
            inbox,
            arrival,
        }
    }

    /// Sends every customer, then `Closing`, then hangs up on the shop.
    async fn send_arrivals(
        customers: u32,
        arrival: &mut dyn DelaySource,
        shop: Mailbox<Visit>,
    ) -> Result<Vec<CustomerId>, SimulationError> {
        let mut entered = Vec::with_capacity(customers as usize);
        for n in 0..customers {
            let delay = arrival.next_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let id = CustomerId(n);
            info!(customer = %id, "Customer enters the shop");
            shop.send(Visit::arrival(id)).await?;
            entered.push(id);
        }
        shop.send(Visit::Closing).await?;
        Ok(entered)
    }

    /// Records customers leaving the shop until `Closing` comes back.
    async fn collect_exits(inbox: &mut Inbox<Visit>) -> Result<Exits, SimulationError> {
        let mut exits = Exits::default();
        while let Visit::Customer(customer) = inbox.expect().await? {
            let id = customer.id();
            match customer.outcome() {
                Outcome::Served => exits.served += 1,
                Outcome::Rejected => exits.rejected += 1,
                Outcome::Pending => {
                    return Err(SimulationError::ProtocolViolation(format!(
                        "{id} left the shop without an outcome"
                    )));
                }
            }
            if exits.outcomes.insert(id, customer.outcome()).is_some() {
                return Err(SimulationError::OutcomeAlreadySettled(id));
            }
            info!(customer = %id, outcome = ?customer.outcome(), "Customer exits the shop");
        }
        Ok(exits)
    }
}

#[async_trait]
impl Actor for World {
    const NAME: &'static str = "world";

    /// Mailbox for arrivals into the shop.
    type Context = Mailbox<Visit>;
    type Report = WorldReport;

    async fn run(mut self, shop: Mailbox<Visit>) -> Result<WorldReport, SimulationError> {
        let (entered, exits) = tokio::try_join!(
            Self::send_arrivals(self.customers, self.arrival.as_mut(), shop),
            Self::collect_exits(&mut self.inbox),
        )?;

        if let Some(missing) = entered.iter().find(|id| !exits.outcomes.contains_key(*id)) {
            return Err(SimulationError::ProtocolViolation(format!(
                "closing reached the world before {missing} left the shop"
            )));
        }
        if exits.outcomes.len() != entered.len() {
            return Err(SimulationError::ProtocolViolation(format!(
                "{} customers left the shop but {} entered",
                exits.outcomes.len(),
                entered.len()
            )));
        }

        info!(
            trimmed = exits.served,
            turned_away = exits.rejected,
            "Trimmed and turned away today"
        );

        // The shop stops right after sending `Closing`.
        if let Some(late) = self.inbox.recv().await {
            warn!(?late, "Visit after closing");
            return Err(SimulationError::ProtocolViolation(format!(
                "world received {late:?} after closing"
            )));
        }

        Ok(WorldReport {
            served: exits.served,
            rejected: exits.rejected,
            entered,
            outcomes: exits.outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockPeer;
    use crate::framework::spawn;
    use crate::model::{Customer, FixedDelay};

    fn settled(id: u32, outcome: Outcome) -> Visit {
        let mut customer = Customer::new(id);
        customer.settle(outcome).unwrap();
        Visit::Customer(customer)
    }

    #[tokio::test]
    async fn test_sends_arrivals_in_order_then_closing() {
        let (world, to_world) = crate::world_actor::new(3, FixedDelay::zero());
        let shop = MockPeer::<Visit>::new("shop", 4);
        let handle = spawn(world, shop.mailbox());

        shop.wait_for(4).await;
        to_world.send(settled(1, Outcome::Rejected)).await.unwrap();
        to_world.send(settled(0, Outcome::Served)).await.unwrap();
        to_world.send(settled(2, Outcome::Served)).await.unwrap();
        to_world.send(Visit::Closing).await.unwrap();
        drop(to_world);

        let report = handle.join().await.unwrap();
        assert_eq!((report.served, report.rejected), (2, 1));
        assert_eq!(report.entered, vec![CustomerId(0), CustomerId(1), CustomerId(2)]);
        assert_eq!(report.outcomes[&CustomerId(1)], Outcome::Rejected);

        let arrivals = shop.finish().await;
        assert_eq!(
            arrivals,
            vec![Visit::arrival(0), Visit::arrival(1), Visit::arrival(2), Visit::Closing]
        );
    }

    #[tokio::test]
    async fn test_no_customers_is_just_closing() {
        let (world, to_world) = crate::world_actor::new(0, FixedDelay::zero());
        let shop = MockPeer::<Visit>::new("shop", 1);
        let handle = spawn(world, shop.mailbox());

        shop.wait_for(1).await;
        to_world.send(Visit::Closing).await.unwrap();
        drop(to_world);

        assert_eq!(handle.join().await.unwrap(), WorldReport::default());
        assert_eq!(shop.finish().await, vec![Visit::Closing]);
    }

    #[tokio::test]
    async fn test_same_customer_exiting_twice_fails() {
        let (world, to_world) = crate::world_actor::new(2, FixedDelay::zero());
        let shop = MockPeer::<Visit>::new("shop", 4);
        let handle = spawn(world, shop.mailbox());

        to_world.send(settled(0, Outcome::Served)).await.unwrap();
        to_world.send(settled(0, Outcome::Rejected)).await.unwrap();

        let err = handle.join().await.unwrap_err();
        assert_eq!(err, SimulationError::OutcomeAlreadySettled(CustomerId(0)));
        drop(shop);
    }

    #[tokio::test]
    async fn test_closing_before_everyone_left_fails() {
        let (world, to_world) = crate::world_actor::new(2, FixedDelay::zero());
        let shop = MockPeer::<Visit>::new("shop", 4);
        let handle = spawn(world, shop.mailbox());

        shop.wait_for(3).await;
        to_world.send(settled(0, Outcome::Served)).await.unwrap();
        to_world.send(Visit::Closing).await.unwrap();

        let err = handle.join().await.unwrap_err();
        assert!(matches!(err, SimulationError::ProtocolViolation(_)), "{err}");
        drop(shop);
    }

    #[tokio::test]
    async fn test_pending_customer_exiting_fails() {
        let (world, to_world) = crate::world_actor::new(1, FixedDelay::zero());
        let shop = MockPeer::<Visit>::new("shop", 2);
        let handle = spawn(world, shop.mailbox());

        to_world.send(Visit::arrival(0)).await.unwrap();

        let err = handle.join().await.unwrap_err();
        assert!(matches!(err, SimulationError::ProtocolViolation(_)), "{err}");
        drop(shop);
    }
}
