//! Core library surface for the client manager.
//!
//! The record store, the table projection, the form controller, the deleter
//! and both exporters work without a terminal; the `ui` module wires them to a
//! Ratatui front-end for the `bin` target.
pub mod config;
pub mod delete;
pub mod error;
pub mod export;
pub mod form;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod ui;
pub mod view;

pub use config::Config;
pub use error::ClientError;
pub use export::{export_image, export_spreadsheet};
pub use form::ClientForm;
pub use models::{ClientRecord, ClientRow, ClientStatus, HEADERS};
pub use session::Session;
pub use store::RecordStore;
pub use view::TableView;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
