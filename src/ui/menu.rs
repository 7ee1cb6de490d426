use crate::app::Route;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

/// Sidebar navigation, in display order.
pub const MENU: &[MenuSection] = &[
    MenuSection {
        title: "Home",
        items: &[MenuItem {
            label: "Dashboard",
            route: Route::Dashboard {},
        }],
    },
    MenuSection {
        title: "Shipments",
        items: &[
            MenuItem {
                label: "Cargo Booking",
                route: Route::BookCargo {},
            },
            MenuItem {
                label: "Shipment List",
                route: Route::ShipmentList {},
            },
        ],
    },
];
