//! Shipment tracking by AWB number.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::awb::AwbNumber;
use crate::error::ApiResult;

/// Where a shipment is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    Booked,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Returned,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TrackingStatus {
    /// No further status changes are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TrackingStatus::Delivered | TrackingStatus::Returned | TrackingStatus::Cancelled
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrackingStatus::Booked => "Booked",
            TrackingStatus::PickedUp => "Picked up",
            TrackingStatus::InTransit => "In transit",
            TrackingStatus::OutForDelivery => "Out for delivery",
            TrackingStatus::Delivered => "Delivered",
            TrackingStatus::Returned => "Returned",
            TrackingStatus::Cancelled => "Cancelled",
            TrackingStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Response from `GET /tracking/{awb}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackingInfo {
    pub awb: String,
    pub status: TrackingStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for TrackingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.awb, self.status)?;
        if let Some(location) = &self.location {
            write!(f, " at {}", location)?;
        }
        if let Some(updated_at) = &self.updated_at {
            write!(f, " ({})", updated_at.format("%Y-%m-%d %H:%M UTC"))?;
        }
        Ok(())
    }
}

/// Polls the tracking endpoint until a shipment settles.
#[derive(Debug, Clone)]
pub struct TrackingPoller {
    client: Arc<ApiClient>,
    interval: Duration,
    max_polls: Option<u32>,
}

impl TrackingPoller {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let interval = client.config().tracking_interval;
        Self {
            client,
            interval,
            max_polls: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Stop after `max_polls` fetches even if the shipment has not settled.
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls.max(1));
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch the current tracking state once.
    pub async fn fetch(&self, awb: &AwbNumber) -> ApiResult<TrackingInfo> {
        self.client
            .get_json(&format!("/tracking/{}", awb.as_str()))
            .await
    }

    /// Fetch repeatedly until the status is terminal or the poll limit is
    /// reached, calling `on_change` with every new status (including the
    /// first). Returns the last state seen; any client error stops polling.
    pub async fn poll<F>(&self, awb: &AwbNumber, mut on_change: F) -> ApiResult<TrackingInfo>
    where
        F: FnMut(&TrackingInfo),
    {
        let mut last_status: Option<TrackingStatus> = None;
        let mut polls: u32 = 0;

        loop {
            let info = self.fetch(awb).await?;
            polls += 1;

            if last_status != Some(info.status) {
                tracing::debug!(awb = %awb, status = %info.status, "Tracking status changed");
                last_status = Some(info.status);
                on_change(&info);
            }

            if info.status.is_terminal() {
                return Ok(info);
            }
            if self.max_polls.is_some_and(|max| polls >= max) {
                tracing::debug!(awb = %awb, polls, "Poll limit reached");
                return Ok(info);
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
