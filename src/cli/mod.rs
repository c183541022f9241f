pub mod convert;
pub mod interactive;
pub mod rate;
pub mod setup;
pub mod trigger;
pub mod ui;
