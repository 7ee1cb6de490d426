//! Booking operations as the pages use them: domain checks in front of the
//! gateway, `success:false` envelopes turned into errors, and fallbacks for
//! the lookups that must never fail.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::{
    local_estimate, round_cents, to_options, BookingPatch, BookingResponse, CargoBooking,
    CargoStatus, CostEstimate, CostSource, SelectOption,
};
use crate::infra::api::{BookingApiClient, BookingGateway, GatewayError};
use crate::util::config::AppConfig;
use crate::util::fallback::{fetch_with_fallback, non_empty, DataSource, Sourced};

pub const MOCK_ORIGINS: [&str; 5] = [
    "Miami Warehouse",
    "New York Hub",
    "Los Angeles Center",
    "Chicago Terminal",
    "Houston Depot",
];

pub const MOCK_DESTINATIONS: [&str; 5] = [
    "Haiti Port",
    "Santo Domingo",
    "Kingston Jamaica",
    "Nassau Bahamas",
    "San Juan Puerto Rico",
];

const CREATE_FAILED: &str = "Failed to create booking";
const REQUEST_FAILED: &str = "Request failed";
const SUBMIT_NETWORK_FAILURE: &str =
    "An error occurred while creating the booking. Please try again.";

#[derive(Debug, Error)]
pub enum BookingError {
    /// Rejected locally before any request was made.
    #[error("{0}")]
    Invalid(String),
    /// The API answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl BookingError {
    /// Text suitable for a toast. Transport details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Invalid(message) | BookingError::Rejected(message) => message.clone(),
            BookingError::Gateway(_) => SUBMIT_NETWORK_FAILURE.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct BookingService {
    gateway: Arc<dyn BookingGateway>,
}

impl BookingService {
    pub fn new(gateway: Arc<dyn BookingGateway>) -> Self {
        Self { gateway }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        let client = BookingApiClient::with_base_url(&config.api_base_url)?;
        debug!(base = %client.base_url(), "booking client ready");
        Ok(Self::new(Arc::new(client)))
    }

    pub async fn origin_options(&self) -> Sourced<Vec<SelectOption>> {
        fetch_with_fallback(
            "origins",
            async { self.gateway.list_origins().await.map(non_empty) },
            || MOCK_ORIGINS.iter().map(|name| name.to_string()).collect(),
        )
        .await
        .map(to_options)
    }

    pub async fn destination_options(&self) -> Sourced<Vec<SelectOption>> {
        fetch_with_fallback(
            "destinations",
            async { self.gateway.list_destinations().await.map(non_empty) },
            || MOCK_DESTINATIONS.iter().map(|name| name.to_string()).collect(),
        )
        .await
        .map(to_options)
    }

    /// Sends a new booking. Returns the stored record when the API echoes one.
    pub async fn create_booking(
        &self,
        booking: &CargoBooking,
    ) -> Result<Option<CargoBooking>, BookingError> {
        check_booking(booking)?;
        let response = self.gateway.create_booking(booking).await.map_err(|err| {
            error!(
                server_side = err.is_server_side(),
                "booking submission failed: {err}"
            );
            BookingError::Gateway(err)
        })?;
        let created = accepted(response, CREATE_FAILED)?;
        info!(
            id = created.as_ref().and_then(|b| b.id.as_deref()).unwrap_or("-"),
            path = %booking.path_label(),
            "booking created"
        );
        Ok(created)
    }

    pub async fn list_bookings(&self) -> Result<Vec<CargoBooking>, BookingError> {
        Ok(self.gateway.list_bookings().await?)
    }

    pub async fn get_booking(&self, id: &str) -> Result<CargoBooking, BookingError> {
        Ok(self.gateway.get_booking(id).await?)
    }

    pub async fn update_booking(
        &self,
        id: &str,
        patch: &BookingPatch,
    ) -> Result<Option<CargoBooking>, BookingError> {
        let response = self.gateway.update_booking(id, patch).await?;
        accepted(response, REQUEST_FAILED)
    }

    pub async fn cancel_booking(&self, id: &str) -> Result<Option<CargoBooking>, BookingError> {
        info!(id, "cancelling booking");
        self.update_booking(id, &BookingPatch::status(CargoStatus::Cancelled))
            .await
    }

    pub async fn delete_booking(&self, id: &str) -> Result<(), BookingError> {
        let response = self.gateway.delete_booking(id).await?;
        accepted(response, REQUEST_FAILED)?;
        info!(id, "booking deleted");
        Ok(())
    }

    /// Remote estimate, or the local formula when the pricing call fails.
    pub async fn estimate_cost(&self, booking: &CargoBooking) -> CostEstimate {
        let estimate = fetch_with_fallback(
            "cost estimate",
            async { self.gateway.estimate_cost(booking).await.map(Some) },
            || local_estimate(&booking.dimensions),
        )
        .await;
        CostEstimate {
            amount: round_cents(estimate.value),
            source: match estimate.source {
                DataSource::Primary => CostSource::Remote,
                DataSource::Fallback => CostSource::LocalFormula,
            },
        }
    }
}

/// Business rules checked before a booking leaves the process.
pub fn check_booking(booking: &CargoBooking) -> Result<(), BookingError> {
    let blank = |value: &str| value.trim().is_empty();
    let message = if blank(&booking.category) || blank(&booking.subcategory) || blank(&booking.item_type)
    {
        "Category, subcategory, and item type are required"
    } else if blank(&booking.package_type) {
        "Package type is required"
    } else if blank(&booking.origin) || blank(&booking.destination) {
        "Origin and destination are required"
    } else if [
        booking.dimensions.length,
        booking.dimensions.width,
        booking.dimensions.height,
        booking.dimensions.weight,
    ]
    .iter()
    .any(|value| value.is_nan() || *value <= 0.0)
    {
        "All dimensions are required"
    } else {
        return Ok(());
    };
    warn!("booking rejected before sending: {message}");
    Err(BookingError::Invalid(message.to_string()))
}

fn accepted(
    response: BookingResponse,
    default_message: &str,
) -> Result<Option<CargoBooking>, BookingError> {
    if response.success {
        return Ok(response.data);
    }
    let message = if response.message.trim().is_empty() {
        default_message.to_string()
    } else {
        response.message
    };
    warn!(detail = ?response.error, "API rejected request: {message}");
    Err(BookingError::Rejected(message))
}
