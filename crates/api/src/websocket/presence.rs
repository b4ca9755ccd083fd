//! Live connected-count announcements

use super::connection::DeliveryReport;
use super::events::ServerEvent;
use super::registry::ConnectionRegistry;

/// Send the current connected count to every registered session
///
/// Must run right after each membership change, before the registry lock is
/// released, so the announced count matches the change that caused it.
pub fn announce(registry: &ConnectionRegistry) -> DeliveryReport {
    let total = registry.size();
    let mut report = DeliveryReport::default();

    registry.for_each(|conn| report.record(conn.send(ServerEvent::ClientsTotal(total))));

    tracing::debug!(
        clients_total = total,
        recipients = report.delivered,
        failed = report.failed,
        "Announced presence count"
    );

    report
}
