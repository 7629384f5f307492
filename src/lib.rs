pub mod calc;
pub mod config;
pub mod error;
pub mod locale;
pub mod sync;
pub mod template;

pub use calc::{allocate, price, Allocation, PROVIDER_ALLOWANCE};
pub use config::{Config, CostDetails, ExtraCost, HistoryEntry, State};
pub use error::{Result, RotaError};
pub use template::{build_values, render, TemplateValues, DEFAULT_TEMPLATE};
