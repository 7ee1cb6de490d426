use dioxus::{prelude::*, signals::Signal};
use tracing::{debug, error};

use crate::{
    domain::AppState,
    infra::catalog::{CatalogSource, CatalogStore},
    service::BookingService,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CargoBookingPage, DashboardPage, ShipmentListPage},
        shell::Shell,
    },
    util::{assets, config::app_config},
};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[route("/")]
    Dashboard {},
    #[redirect("/shipments", || Route::BookCargo {})]
    #[route("/shipments/cargo-booking")]
    BookCargo {},
    #[route("/shipments/list")]
    ShipmentList {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    let store = use_hook(|| CatalogStore::new(CatalogSource::from_config(app_config())));
    use_context_provider(|| store.clone());

    let _catalog_feed = use_future({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move { follow_catalog(state, store).await }
        }
    });

    let _catalog = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move { store.load().await.source }
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Mirrors every catalog the store publishes into the shared [`AppState`].
async fn follow_catalog(mut state: Signal<AppState>, store: CatalogStore) {
    let mut updates = store.subscribe();
    loop {
        let published = updates.borrow_and_update().clone();
        if let Some(loaded) = published {
            debug!(fallback = loaded.is_fallback(), "catalog published to app state");
            state.with_mut(|st| st.apply_catalog(&loaded));
        }
        if updates.changed().await.is_err() {
            break;
        }
    }
}

/// Builds a service for the configured API, or reports why it cannot.
pub fn booking_service(toasts: Signal<Vec<ToastMessage>>) -> Option<BookingService> {
    match BookingService::from_config(app_config()) {
        Ok(service) => Some(service),
        Err(err) => {
            error!(base = %app_config().api_base_url, "cannot build booking client: {err}");
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Booking API is misconfigured: {err}"),
            );
            None
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn BookCargo() -> Element {
    rsx! { Shell { CargoBookingPage {} } }
}

#[component]
pub fn ShipmentList() -> Element {
    rsx! { Shell { ShipmentListPage {} } }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn routes_render_their_paths() {
        assert_eq!(Route::Dashboard {}.to_string(), "/");
        assert_eq!(Route::BookCargo {}.to_string(), "/shipments/cargo-booking");
        assert_eq!(Route::ShipmentList {}.to_string(), "/shipments/list");
    }

    #[test]
    fn shipment_paths_parse() {
        assert_eq!(
            Route::from_str("/shipments/list").ok(),
            Some(Route::ShipmentList {})
        );
        assert_eq!(
            Route::from_str("/shipments/cargo-booking").ok(),
            Some(Route::BookCargo {})
        );
    }

    #[test]
    fn bare_shipments_path_redirects_to_booking() {
        assert_eq!(Route::from_str("/shipments").ok(), Some(Route::BookCargo {}));
    }
}
