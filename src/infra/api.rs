//! Thin asynchronous client for the cargo booking REST API.
//!
//! - One method per endpoint, all behind [`BookingGateway`].
//! - Transport and HTTP failures collapse into [`GatewayError`]; a status
//!   code marks the failure as server-side.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::domain::{BookingPatch, BookingResponse, CargoBooking};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/";
const USER_AGENT: &str = concat!("cargo-booking-desk/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Error: invalid URL ({0})")]
    InvalidUrl(#[from] url::ParseError),
    /// The request never produced an HTTP status (connect, DNS, body decoding).
    #[error("Error: {message}")]
    Client { message: String },
    #[error("Error Code: {status}\nMessage: {message}")]
    Server { status: u16, message: String },
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_server_side(&self) -> bool {
        self.status().is_some()
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GatewayError::Server {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => GatewayError::Client {
                message: err.to_string(),
            },
        }
    }
}

/// Every remote operation the booking desk needs.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn create_booking(&self, booking: &CargoBooking) -> Result<BookingResponse, GatewayError>;
    async fn list_bookings(&self) -> Result<Vec<CargoBooking>, GatewayError>;
    async fn get_booking(&self, id: &str) -> Result<CargoBooking, GatewayError>;
    async fn update_booking(
        &self,
        id: &str,
        patch: &BookingPatch,
    ) -> Result<BookingResponse, GatewayError>;
    async fn delete_booking(&self, id: &str) -> Result<BookingResponse, GatewayError>;
    async fn list_origins(&self) -> Result<Vec<String>, GatewayError>;
    async fn list_destinations(&self) -> Result<Vec<String>, GatewayError>;
    async fn estimate_cost(&self, booking: &CargoBooking) -> Result<f64, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct CostDto {
    cost: f64,
}

#[derive(Clone, Debug)]
pub struct BookingApiClient {
    http: Client,
    base_url: Url,
}

impl BookingApiClient {
    pub fn with_base_url(base: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&normalize_base(base))?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(%method, %url, "calling booking API");
        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let result = async {
            let response = builder.send().await?.error_for_status()?;
            Ok::<T, reqwest::Error>(response.json::<T>().await?)
        }
        .await;
        result.map_err(|err| {
            let err = GatewayError::from(err);
            error!(%method, %url, "{err}");
            err
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        self.send::<(), T>(Method::GET, url, None).await
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    /// `cargo/booking/{id}` with the id percent-encoded as a single segment.
    fn booking_url(&self, id: &str) -> Result<Url, GatewayError> {
        let mut url = self.url("cargo/booking/")?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::Client {
                message: format!("base URL {} cannot carry a booking id", self.base_url),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl BookingGateway for BookingApiClient {
    async fn create_booking(&self, booking: &CargoBooking) -> Result<BookingResponse, GatewayError> {
        self.send(Method::POST, self.url("cargo/booking")?, Some(booking))
            .await
    }

    async fn list_bookings(&self) -> Result<Vec<CargoBooking>, GatewayError> {
        self.get(self.url("cargo/bookings")?).await
    }

    async fn get_booking(&self, id: &str) -> Result<CargoBooking, GatewayError> {
        self.get(self.booking_url(id)?).await
    }

    async fn update_booking(
        &self,
        id: &str,
        patch: &BookingPatch,
    ) -> Result<BookingResponse, GatewayError> {
        self.send(Method::PUT, self.booking_url(id)?, Some(patch))
            .await
    }

    async fn delete_booking(&self, id: &str) -> Result<BookingResponse, GatewayError> {
        self.send::<(), _>(Method::DELETE, self.booking_url(id)?, None)
            .await
    }

    async fn list_origins(&self) -> Result<Vec<String>, GatewayError> {
        self.get(self.url("cargo/origins")?).await
    }

    async fn list_destinations(&self) -> Result<Vec<String>, GatewayError> {
        self.get(self.url("cargo/destinations")?).await
    }

    async fn estimate_cost(&self, booking: &CargoBooking) -> Result<f64, GatewayError> {
        let dto: CostDto = self
            .send(Method::POST, self.url("cargo/calculate-cost")?, Some(booking))
            .await?;
        Ok(dto.cost)
    }
}

/// `Url::join` drops the last path segment unless the base ends with '/'.
fn normalize_base(base: &str) -> String {
    let trimmed = base.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}
