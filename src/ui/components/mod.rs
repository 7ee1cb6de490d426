pub mod booking_table;
pub mod kpi_card;
pub mod select_field;
pub mod status_badge;
pub mod toast;
