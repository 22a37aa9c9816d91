pub mod epa;
pub mod gjk;

pub use epa::{epa, epa_with_config, penetration, penetration_with_config, Penetration};
pub use gjk::{gjk, gjk_with_config, intersects, Simplex};
