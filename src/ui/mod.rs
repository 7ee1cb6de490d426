pub mod components;
pub mod menu;
pub mod pages;
pub mod shell;
pub mod theme;
