//! Class helpers so pages agree on how state is styled.

use crate::domain::CargoStatus;

// ============================================
// BUTTON STYLES
// ============================================

pub const BTN_PRIMARY: &str = "btn btn--primary";
pub const BTN_GHOST: &str = "btn btn--ghost";
pub const BTN_SMALL: &str = "btn btn--ghost btn--small";
pub const BTN_SMALL_DANGER: &str = "btn btn--danger btn--small";

pub fn nav_link(active: bool) -> &'static str {
    if active {
        "nav-link nav-link--active"
    } else {
        "nav-link"
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class(invalid: bool) -> &'static str {
    if invalid {
        "input input--invalid"
    } else {
        "input"
    }
}

// ============================================
// STATUS STYLES
// ============================================

pub fn status_badge(status: CargoStatus) -> &'static str {
    match status {
        CargoStatus::Pending => "badge badge--pending",
        CargoStatus::Confirmed => "badge badge--confirmed",
        CargoStatus::InTransit => "badge badge--transit",
        CargoStatus::Delivered => "badge badge--delivered",
        CargoStatus::Cancelled => "badge badge--cancelled",
    }
}

pub fn table_row(selected: bool) -> &'static str {
    if selected {
        "is-selected"
    } else {
        ""
    }
}
