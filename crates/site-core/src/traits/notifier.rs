//! Outbound lead notifications

use async_trait::async_trait;

use crate::entities::ContactNotice;

/// Outcome of a fan-out to every subscribed recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

impl DeliveryReport {
    /// At least one recipient got the message
    #[inline]
    pub fn is_success(&self) -> bool {
        self.delivered > 0
    }

    /// Nothing was attempted (no credential or no recipients)
    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.delivered == 0 && self.failed == 0
    }
}

/// Announces new leads to operators
///
/// Implementations are best-effort: they log their own failures and report
/// them through [`DeliveryReport`] instead of returning errors.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_contact(&self, notice: &ContactNotice) -> DeliveryReport;
}

/// Notifier that drops everything, used when no channel is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify_contact(&self, _notice: &ContactNotice) -> DeliveryReport {
        DeliveryReport::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_failure_is_success() {
        let report = DeliveryReport {
            delivered: 1,
            failed: 2,
        };
        assert!(report.is_success());
        assert!(!report.is_skipped());
    }

    #[test]
    fn test_empty_report() {
        let report = DeliveryReport::default();
        assert!(!report.is_success());
        assert!(report.is_skipped());
    }

    #[tokio::test]
    async fn test_noop_notifier() {
        let notice = ContactNotice {
            name: "Иван".to_string(),
            phone: "+79141234567".to_string(),
            email: None,
            message: String::new(),
            is_callback: true,
        };
        assert!(NoopNotifier.notify_contact(&notice).await.is_skipped());
    }
}
