use crate::framework::{Actor, Inbox, Mailbox, SimulationError};
use crate::model::{BarberReport, DelaySource, Outcome, Visit};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// A single barber working through the shop's queue.
pub struct Barber {
    inbox: Inbox<Visit>,
    service: Box<dyn DelaySource>,
}

impl Barber {
    pub fn new(inbox: Inbox<Visit>, service: Box<dyn DelaySource>) -> Self {
        Self { inbox, service }
    }
}

#[async_trait]
impl Actor for Barber {
    const NAME: &'static str = "barber";

    /// Mailbox back to the shop.
    type Context = Mailbox<Visit>;
    type Report = BarberReport;

    async fn run(mut self, shop: Mailbox<Visit>) -> Result<BarberReport, SimulationError> {
        let mut report = BarberReport::default();

        // Sleeping in the chair until the shop sends someone.
        while let Visit::Customer(mut customer) = self.inbox.expect().await? {
            let id = customer.id();
            let trim = self.service.next_delay();
            info!(customer = %id, "Starting customer");
            debug!(customer = %id, ?trim, "Trimming");
            if !trim.is_zero() {
                tokio::time::sleep(trim).await;
            }

            customer.settle(Outcome::Served)?;
            report.trimmed += 1;
            report.service_order.push(id);
            info!(customer = %id, "Finished customer");
            shop.send(customer.into()).await?;
        }

        info!(trimmed = report.trimmed, "Knocking off time");
        shop.send(Visit::Closing).await?;

        // The shop hangs up once it has passed the acknowledgement on.
        if let Some(late) = self.inbox.recv().await {
            warn!(?late, "Visit after closing");
            return Err(SimulationError::ProtocolViolation(format!(
                "barber received {late:?} after closing"
            )));
        }
        Ok(report)
    }
}
