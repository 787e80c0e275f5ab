pub mod amount;
pub mod console;
pub mod engine;
pub mod format;
pub mod invoice;
pub mod model;
pub mod policy;
pub mod progress;
pub mod rates;
pub mod validate;

pub use amount::Amount;
pub use engine::{Engine, Quote};
pub use model::{ClaimRecord, Coverage, CustomerRecord, Payment, PolicyNumber};
pub use rates::RateConfiguration;
