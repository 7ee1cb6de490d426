use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::AppState,
    infra::catalog::CatalogStore,
    ui::{components::kpi_card::KpiCard, theme},
    util::config::app_config,
};

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<CatalogStore>();

    let (ready, categories, items, fallback) = state.with(|st| {
        (
            st.catalog_ready(),
            st.category_count(),
            st.item_count(),
            st.uses_default_catalog(),
        )
    });
    let source = if !ready {
        "Loading…".to_string()
    } else if fallback {
        "Built-in defaults".to_string()
    } else {
        store.source().describe()
    };
    let endpoint = app_config().api_base_url.clone();

    rsx! {
        div {
            h2 { class: "page-title", "Dashboard" }
            p { class: "page-subtitle", "Book cargo and follow your shipments." }

            section { class: "grid grid--3",
                KpiCard {
                    title: "Categories".to_string(),
                    value: categories.to_string(),
                    description: Some(format!("{items} item types")),
                }
                KpiCard {
                    title: "Catalog".to_string(),
                    value: source,
                    description: fallback.then(|| "Catalog file could not be read".to_string()),
                }
                KpiCard {
                    title: "Booking API".to_string(),
                    value: endpoint,
                    description: None,
                }
            }

            section { class: "panel",
                h3 { class: "panel__title", "Shipments" }
                div { class: "actions",
                    Link { class: theme::BTN_GHOST, to: Route::ShipmentList {}, "View shipments" }
                    Link { class: theme::BTN_PRIMARY, to: Route::BookCargo {}, "Book cargo" }
                }
            }
        }
    }
}
