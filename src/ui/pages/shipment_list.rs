use dioxus::prelude::*;
use tracing::warn;

use crate::{
    app::booking_service,
    domain::CargoBooking,
    service::BookingError,
    ui::{
        components::{
            booking_table::{BookingRow, BookingTable},
            kpi_card::KpiCard,
            status_badge::StatusBadge,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn ShipmentListPage() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut bookings = use_signal(Vec::<CargoBooking>::new);
    let mut selected_id = use_signal(|| None::<String>);
    let mut detail = use_signal(|| None::<CargoBooking>);
    // Bumped to re-run the list request.
    let mut reload = use_signal(|| 0_u32);

    let _list = use_resource(move || async move {
        let _ = reload();
        let Some(service) = booking_service(toasts) else {
            return;
        };
        match service.list_bookings().await {
            Ok(list) => bookings.set(list),
            Err(err) => {
                warn!("failed to load bookings: {err}");
                bookings.set(Vec::new());
                push_toast(toasts, ToastKind::Error, failure_text("load bookings", &err));
            }
        }
    });

    let on_select = move |id: String| {
        selected_id.set(Some(id.clone()));
        spawn(async move {
            let Some(service) = booking_service(toasts) else {
                return;
            };
            match service.get_booking(&id).await {
                Ok(booking) => detail.set(Some(booking)),
                Err(err) => {
                    detail.set(None);
                    push_toast(toasts, ToastKind::Error, failure_text("load booking", &err));
                }
            }
        });
    };

    let on_cancel = move |id: String| {
        spawn(async move {
            let Some(service) = booking_service(toasts) else {
                return;
            };
            match service.cancel_booking(&id).await {
                Ok(_) => {
                    push_toast(toasts, ToastKind::Success, "Booking cancelled.");
                    if selected_id.peek().as_deref() == Some(id.as_str()) {
                        detail.set(None);
                    }
                    reload += 1;
                }
                Err(err) => {
                    push_toast(toasts, ToastKind::Error, failure_text("cancel booking", &err));
                }
            }
        });
    };

    let on_delete = move |id: String| {
        spawn(async move {
            let Some(service) = booking_service(toasts) else {
                return;
            };
            match service.delete_booking(&id).await {
                Ok(()) => {
                    push_toast(toasts, ToastKind::Info, "Booking deleted.");
                    bookings.with_mut(|list| list.retain(|b| b.id.as_deref() != Some(id.as_str())));
                    if selected_id.peek().as_deref() == Some(id.as_str()) {
                        selected_id.set(None);
                        detail.set(None);
                    }
                }
                Err(err) => {
                    push_toast(toasts, ToastKind::Error, failure_text("delete booking", &err));
                }
            }
        });
    };

    let list = bookings();
    let rows: Vec<BookingRow> = list.iter().filter_map(BookingRow::from_booking).collect();
    let open = list
        .iter()
        .filter(|b| b.status_or_default().is_cancellable())
        .count();

    rsx! {
        div {
            h2 { class: "page-title", "Shipment List" }
            p { class: "page-subtitle", "Bookings stored by the booking API." }

            section { class: "grid grid--2",
                KpiCard {
                    title: "Bookings".to_string(),
                    value: list.len().to_string(),
                    description: None,
                }
                KpiCard {
                    title: "Open".to_string(),
                    value: open.to_string(),
                    description: Some("Pending or confirmed".to_string()),
                }
            }

            section { class: "panel",
                div { class: "actions",
                    button {
                        class: theme::BTN_GHOST,
                        onclick: move |_| reload += 1,
                        "Refresh"
                    }
                }
                BookingTable {
                    rows,
                    selected_id: selected_id(),
                    on_select,
                    on_cancel,
                    on_delete,
                }
            }

            if let Some(booking) = detail() {
                BookingDetail { booking }
            }
        }
    }
}

#[component]
fn BookingDetail(booking: CargoBooking) -> Element {
    let dims = &booking.dimensions;
    let declared = booking
        .declared_value
        .map(|value| format!("${value:.2}"))
        .unwrap_or_else(|| "n/a".to_string());
    let insured = if booking.insurance.unwrap_or(false) { "Yes" } else { "No" };
    let description = booking.description.clone().unwrap_or_default();
    rsx! {
        section { class: "panel",
            h3 { class: "panel__title", "Booking {booking.id.clone().unwrap_or_default()}" }
            StatusBadge { status: booking.status_or_default() }
            div { class: "grid grid--2",
                p { "{booking.path_label()}" }
                p { "Package: {booking.package_type}" }
                p { "From {booking.origin} to {booking.destination}" }
                p { "Size: {dims.length} × {dims.width} × {dims.height}, weight {dims.weight}" }
                p { "Declared value: {declared}" }
                p { "Insured: {insured}" }
            }
            if !description.is_empty() {
                p { class: "notice", "{description}" }
            }
        }
    }
}

fn failure_text(action: &str, err: &BookingError) -> String {
    match err {
        BookingError::Gateway(inner) => format!("Failed to {action}: {inner}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::api::GatewayError;

    #[test]
    fn gateway_failures_name_the_action() {
        let err = BookingError::Gateway(GatewayError::Server {
            status: 404,
            message: "not found".to_string(),
        });
        assert_eq!(
            failure_text("load booking", &err),
            "Failed to load booking: Error Code: 404\nMessage: not found"
        );
    }

    #[test]
    fn rejections_keep_the_server_text() {
        let err = BookingError::Rejected("Booking is locked".to_string());
        assert_eq!(failure_text("delete booking", &err), "Booking is locked");
    }
}
