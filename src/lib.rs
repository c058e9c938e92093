pub mod badge;
pub mod client;
pub mod dashboard;
pub mod dni;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod models;
pub mod portal;
pub mod progress;
