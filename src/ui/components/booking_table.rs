use std::time::SystemTime;

use dioxus::prelude::*;

use super::status_badge::StatusBadge;
use crate::domain::{CargoBooking, CargoStatus};
use crate::ui::theme;

#[derive(Clone, PartialEq)]
pub struct BookingRow {
    pub id: String,
    pub path: String,
    pub package_type: String,
    pub lane: String,
    pub created: String,
    pub status: CargoStatus,
}

impl BookingRow {
    /// Rows need an id to be selectable; bookings without one are skipped.
    pub fn from_booking(booking: &CargoBooking) -> Option<Self> {
        let id = booking.id.clone()?;
        Some(Self {
            id,
            path: booking.path_label(),
            package_type: booking.package_type.clone(),
            lane: format!("{} → {}", booking.origin, booking.destination),
            created: booking
                .created_at()
                .map(humanize_age)
                .unwrap_or_else(|| "n/a".to_string()),
            status: booking.status_or_default(),
        })
    }
}

#[component]
pub fn BookingTable(
    rows: Vec<BookingRow>,
    selected_id: Option<String>,
    on_select: EventHandler<String>,
    on_cancel: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let is_empty = rows.is_empty();
    let rendered_rows = rows
        .into_iter()
        .map(|row| {
            let selected = selected_id.as_ref() == Some(&row.id);
            (row, selected)
        })
        .collect::<Vec<_>>();
    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Cargo" }
                    th { "Package" }
                    th { "Lane" }
                    th { "Created" }
                    th { "Status" }
                    th {}
                }
            }
            tbody {
                for (row, selected) in rendered_rows {
                    BookingRowView {
                        row,
                        selected,
                        on_select,
                        on_cancel,
                        on_delete,
                    }
                }
                if is_empty {
                    tr {
                        td {
                            class: "notice",
                            colspan: "6",
                            "No bookings yet."
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct BookingRowViewProps {
    row: BookingRow,
    selected: bool,
    on_select: EventHandler<String>,
    on_cancel: EventHandler<String>,
    on_delete: EventHandler<String>,
}

#[component]
fn BookingRowView(props: BookingRowViewProps) -> Element {
    let row = props.row;
    let select_id = row.id.clone();
    let cancel_id = row.id.clone();
    let delete_id = row.id.clone();
    let cancellable = row.status.is_cancellable();
    rsx! {
        tr {
            class: theme::table_row(props.selected),
            onclick: move |_| props.on_select.call(select_id.clone()),
            td { "{row.path}" }
            td { "{row.package_type}" }
            td { "{row.lane}" }
            td { class: "notice", "{row.created}" }
            td { StatusBadge { status: row.status } }
            td {
                class: "actions",
                button {
                    class: theme::BTN_SMALL,
                    disabled: !cancellable,
                    onclick: move |evt| {
                        evt.stop_propagation();
                        props.on_cancel.call(cancel_id.clone());
                    },
                    "Cancel"
                }
                button {
                    class: theme::BTN_SMALL_DANGER,
                    onclick: move |evt| {
                        evt.stop_propagation();
                        props.on_delete.call(delete_id.clone());
                    },
                    "Delete"
                }
            }
        }
    }
}

pub fn humanize_age(created_at: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(created_at)
        .unwrap_or_default()
        .as_secs();
    if age < 60 {
        format!("{age}s ago")
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}
