pub mod narrow_phase;
pub mod swept;

pub use narrow_phase::{
    epa, epa_with_config, gjk, gjk_with_config, intersects, penetration, penetration_with_config,
    Penetration, Simplex,
};
pub use swept::{swept_aabb, swept_aabb_3d, swept_aabb_xz, SweepHit};
