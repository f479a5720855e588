pub mod error;
pub mod option;
pub mod race;
pub mod template;

pub use error::{SelectionError, SelectionResult, TemplateError, TemplateResult};
pub use option::{OptionType, RandomizerOption};
pub use race::{RacePlan, Racer, Team};
pub use template::GameTemplate;
