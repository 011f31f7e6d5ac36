mod extra_cost;

pub use extra_cost::{ExtraCost, ExtraCostKind};
