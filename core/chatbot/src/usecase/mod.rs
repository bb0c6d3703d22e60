pub mod app;
pub mod turn;
