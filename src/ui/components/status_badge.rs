use dioxus::prelude::*;

use crate::domain::CargoStatus;
use crate::ui::theme;

#[component]
pub fn StatusBadge(status: CargoStatus) -> Element {
    rsx! {
        span {
            class: theme::status_badge(status),
            "{status.label()}"
        }
    }
}
