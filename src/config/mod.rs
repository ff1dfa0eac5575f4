pub mod loading;
pub mod models;
pub mod printers;
pub mod schedule;
