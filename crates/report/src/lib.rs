//! Strategic report generation and follow-up chat.
//!
//! - [`schema`] describes the structured output the model must return
//! - [`model`] holds the typed report
//! - [`generate`] runs the single generation call
//! - [`chat`] keeps a grounded follow-up conversation about one report

pub mod chat;
pub mod generate;
pub mod model;
pub mod schema;

pub use chat::ChatSession;
pub use generate::ReportGenerator;
pub use model::StrategicReport;
