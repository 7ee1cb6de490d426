pub mod cargo_booking;
pub mod dashboard;
pub mod shipment_list;

pub use cargo_booking::CargoBookingPage;
pub use dashboard::DashboardPage;
pub use shipment_list::ShipmentListPage;
