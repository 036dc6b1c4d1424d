//! Best-effort status notifications.
//!
//! A [`Notifier`] receives a `(title, options)` pair for every order status change. Delivery
//! is fire-and-forget: [`NotificationPublisher`] logs failures and never returns them, so a
//! broken sink cannot fail the status update that triggered it. A sink that does not answer
//! within `notifications.timeout_ms` is abandoned.
//!
//! The tag is `order-<id>`, so a newer notification for the same order replaces the older one.

use crate::config::NotificationConfig;
use crate::model::{Order, OrderStatus};
use crate::state_machine::order::StatusChange;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification sink failed: {message}")]
    SinkFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationOptions {
    pub body: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub options: NotificationOptions,
}

impl Notification {
    /// The message for `order` having reached `status`.
    pub fn for_status(order: &Order, status: OrderStatus, icon: Option<&str>) -> Self {
        let table = order.table_number;
        let (title, body) = match status {
            OrderStatus::Pending => (
                "Order received",
                format!("Table {table}: your order is waiting for the kitchen."),
            ),
            OrderStatus::Preparing => (
                "Order is being prepared",
                format!("Table {table}: the kitchen has started on your order."),
            ),
            OrderStatus::Ready => (
                "Food prepared",
                format!("Table {table}: your food is ready."),
            ),
            OrderStatus::Serving => (
                "Serving",
                format!("Table {table}: your food is on its way."),
            ),
            OrderStatus::Served => ("Served", format!("Table {table}: enjoy your meal!")),
            OrderStatus::Completed => (
                "Order completed",
                format!("Table {table}: thank you, {}!", order.customer.name),
            ),
        };
        Self {
            title: title.to_string(),
            options: NotificationOptions {
                body,
                tag: tag_for(order),
                icon: icon.map(str::to_string),
                actions: vec![NotificationAction {
                    action: "view".to_string(),
                    title: "View order".to_string(),
                }],
            },
        }
    }
}

pub fn tag_for(order: &Order) -> String {
    format!("order-{}", order.id.0)
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    fn name(&self) -> &'static str {
        "tracing"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            title = %notification.title,
            tag = %notification.options.tag,
            body = %notification.options.body,
            "Notification"
        );
        Ok(())
    }
}

/// Pushes notifications into a channel, for status views that render them.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    fn name(&self) -> &'static str {
        "channel"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sender
            .send(notification.clone())
            .map_err(|_| NotifyError::SinkFailed {
                message: "receiver dropped".to_string(),
            })
    }
}

/// Turns status changes into notifications and delivers them, swallowing failures.
#[derive(Clone)]
pub struct NotificationPublisher {
    notifier: Arc<dyn Notifier>,
    enabled: bool,
    icon: Option<String>,
    timeout: Duration,
}

impl NotificationPublisher {
    pub fn new(notifier: Arc<dyn Notifier>, config: &NotificationConfig) -> Self {
        Self {
            notifier,
            enabled: config.enabled,
            icon: config.icon.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    pub async fn status_changed(&self, order: &Order, change: StatusChange) {
        if !self.enabled {
            debug!(order_id = %order.id, to = %change.to, "Notifications disabled");
            return;
        }
        let notification = Notification::for_status(order, change.to, self.icon.as_deref());
        match tokio::time::timeout(self.timeout, self.notifier.notify(&notification)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(
                sink = self.notifier.name(),
                order_id = %order.id,
                from = %change.from,
                to = %change.to,
                "Notification failed: {e}"
            ),
            Err(_) => warn!(
                sink = self.notifier.name(),
                order_id = %order.id,
                to = %change.to,
                timeout_ms = self.timeout.as_millis() as u64,
                "Notification timed out"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerInfo, OrderId, RestaurantId};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn mk_order() -> Order {
        Order {
            id: OrderId(12),
            restaurant_id: RestaurantId(1),
            customer: CustomerInfo::named("Ada"),
            table_number: 5,
            ordered_at: Utc::now(),
            items: vec![],
            total: Decimal::ZERO,
            status: OrderStatus::Preparing,
            notes: None,
        }
    }

    fn change(to: OrderStatus) -> StatusChange {
        StatusChange {
            from: OrderStatus::Pending,
            to,
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
            Err(NotifyError::SinkFailed {
                message: "push service down".to_string(),
            })
        }
    }

    #[test]
    fn tag_identifies_the_order() {
        let notification = Notification::for_status(&mk_order(), OrderStatus::Ready, None);
        assert_eq!(notification.title, "Food prepared");
        assert_eq!(notification.options.tag, "order-12");
        assert!(notification.options.body.contains("Table 5"));
    }

    #[test]
    fn serializes_without_empty_icon() {
        let notification = Notification::for_status(&mk_order(), OrderStatus::Served, None);
        let json = serde_json::to_value(&notification).unwrap();
        assert!(json["options"].get("icon").is_none());
        assert_eq!(json["options"]["actions"][0]["action"], "view");
    }

    #[tokio::test]
    async fn channel_notifier_delivers() {
        let (notifier, mut receiver) = ChannelNotifier::new();
        let config = NotificationConfig {
            icon: Some("/bell.png".into()),
            ..NotificationConfig::default()
        };
        let publisher = NotificationPublisher::new(Arc::new(notifier), &config);

        publisher
            .status_changed(&mk_order(), change(OrderStatus::Preparing))
            .await;

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.title, "Order is being prepared");
        assert_eq!(received.options.icon.as_deref(), Some("/bell.png"));
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let publisher =
            NotificationPublisher::new(Arc::new(FailingNotifier), &NotificationConfig::default());
        // Must return normally.
        publisher
            .status_changed(&mk_order(), change(OrderStatus::Completed))
            .await;
    }

    struct SilentNotifier;

    #[async_trait]
    impl Notifier for SilentNotifier {
        fn name(&self) -> &'static str {
            "silent"
        }

        async fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn unresponsive_sink_is_abandoned() {
        let config = NotificationConfig {
            timeout_ms: 50,
            ..NotificationConfig::default()
        };
        let publisher = NotificationPublisher::new(Arc::new(SilentNotifier), &config);

        let delivered = tokio::time::timeout(
            Duration::from_secs(1),
            publisher.status_changed(&mk_order(), change(OrderStatus::Ready)),
        )
        .await;
        assert!(delivered.is_ok());
    }

    #[tokio::test]
    async fn disabled_publisher_sends_nothing() {
        let (notifier, mut receiver) = ChannelNotifier::new();
        let config = NotificationConfig {
            enabled: false,
            ..NotificationConfig::default()
        };
        let publisher = NotificationPublisher::new(Arc::new(notifier), &config);

        publisher
            .status_changed(&mk_order(), change(OrderStatus::Preparing))
            .await;
        assert!(receiver.try_recv().is_err());
    }
}
