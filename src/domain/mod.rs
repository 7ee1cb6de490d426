//! Booking domain: catalog model, the booking form and cost rules.

pub mod app_state;
pub mod booking_form;
pub mod catalog;
pub mod cost;
pub mod entities;

pub use app_state::AppState;
pub use booking_form::{
    BookingForm, DeclaredValueInput, DimensionField, FormField, SubmitBlocked, SubmitOutcome,
};
pub use catalog::{default_catalog, Catalog};
pub use cost::{local_estimate, round_cents, CostEstimate, CostSource};
pub use entities::{
    to_options, BookingPatch, BookingResponse, CargoBooking, CargoStatus, LengthUnit,
    SelectOption, WeightUnit,
};
