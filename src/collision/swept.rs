//! Continuous collision between axis-aligned boxes.
//!
//! Each axis is treated as a 1D interval sweep: the moving box enters the static box's slab at
//! `entry` and leaves it at `exit`, both measured in fractions of the frame's velocity. The boxes
//! touch when every slab is entered before any is left.

use crate::geometry::Hitbox;
use crate::math::Vec3;

/// Result of a swept test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Fraction of the velocity that can be travelled before contact, in `[0, 1]`.
    /// `1.0` means the full displacement is free.
    pub time: f32,
    /// Face normal of the static box at the contact, or zero when there is no contact
    pub normal: Vec3,
}

impl SweepHit {
    /// No contact this frame
    pub const NONE: Self = Self {
        time: 1.0,
        normal: Vec3::ZERO,
    };

    /// Returns true when contact happens within this frame's travel
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.normal != Vec3::ZERO
    }
}

/// Entry/exit of one axis.
#[derive(Debug, Clone, Copy)]
struct AxisSweep {
    /// Distance to close before touching
    inv_entry: f32,
    entry: f32,
    exit: f32,
}

impl AxisSweep {
    /// Slab sweep along one axis. A motionless axis never constrains the sweep.
    fn new(
        moving_min: f32,
        moving_max: f32,
        fixed_min: f32,
        fixed_max: f32,
        velocity: f32,
    ) -> Self {
        let (inv_entry, inv_exit) = if velocity > 0.0 {
            (fixed_min - moving_max, fixed_max - moving_min)
        } else {
            (fixed_max - moving_min, fixed_min - moving_max)
        };

        if velocity == 0.0 {
            Self {
                inv_entry,
                entry: f32::NEG_INFINITY,
                exit: f32::INFINITY,
            }
        } else {
            Self {
                inv_entry,
                entry: inv_entry / velocity,
                exit: inv_exit / velocity,
            }
        }
    }

    /// Like [`AxisSweep::new`], but a motionless axis whose intervals are apart is never entered.
    fn new_bounded(
        moving_min: f32,
        moving_max: f32,
        fixed_min: f32,
        fixed_max: f32,
        velocity: f32,
    ) -> Self {
        let sweep = Self::new(moving_min, moving_max, fixed_min, fixed_max, velocity);
        if velocity == 0.0 && (moving_max <= fixed_min || moving_min >= fixed_max) {
            Self {
                entry: f32::INFINITY,
                exit: f32::NEG_INFINITY,
                ..sweep
            }
        } else {
            sweep
        }
    }

    /// Sign of the static face that is hit: facing against the approach
    #[inline]
    fn normal_sign(&self) -> f32 {
        if self.inv_entry < 0.0 {
            1.0
        } else {
            -1.0
        }
    }
}

/// Swept test of `moving` against `fixed` on the X and Z axes, writing the contact normal.
///
/// Returns the fraction of `moving.velocity` that can be applied before the boxes touch;
/// `1.0` means no contact this frame and zeroes `out_normal`. The Y axis is ignored, and an
/// axis with zero velocity places no constraint on the result.
///
/// Contact is also dismissed whenever the X slab is already entered (`entry_x < 0`) and the Z
/// entry falls within the frame, so approaches driven by Z alone report no contact. Use
/// [`swept_aabb_3d`] for a test without that restriction.
pub fn swept_aabb(moving: &Hitbox, fixed: &Hitbox, out_normal: &mut Vec3) -> f32 {
    let hit = swept_aabb_xz(moving, fixed);
    *out_normal = hit.normal;
    hit.time
}

/// Swept test on the X and Z axes. See [`swept_aabb`].
pub fn swept_aabb_xz(moving: &Hitbox, fixed: &Hitbox) -> SweepHit {
    let (m_min, m_max) = (moving.min(), moving.max());
    let (f_min, f_max) = (fixed.min(), fixed.max());

    let x = AxisSweep::new(m_min.x, m_max.x, f_min.x, f_max.x, moving.velocity.x);
    let z = AxisSweep::new(m_min.z, m_max.z, f_min.z, f_max.z, moving.velocity.z);

    let entry_time = x.entry.max(z.entry);
    let exit_time = x.exit.min(z.exit);

    if entry_time > exit_time
        || (x.entry < 0.0 && z.entry < 1.0)
        || x.entry > 1.0
        || z.entry > 1.0
    {
        return SweepHit::NONE;
    }

    let normal = if x.entry >= z.entry {
        Vec3::new(x.normal_sign(), 0.0, 0.0)
    } else {
        Vec3::new(0.0, 0.0, z.normal_sign())
    };

    SweepHit {
        time: entry_time,
        normal,
    }
}

/// Swept test on all three axes.
///
/// Unlike [`swept_aabb_xz`], a motionless axis on which the boxes are apart rules the contact
/// out, and contact is dismissed only when every axis was entered before the frame began, so
/// an approach along any single axis is reported. When two axes are entered at the same time
/// the normal favours X, then Y, then Z.
pub fn swept_aabb_3d(moving: &Hitbox, fixed: &Hitbox) -> SweepHit {
    let (m_min, m_max) = (moving.min(), moving.max());
    let (f_min, f_max) = (fixed.min(), fixed.max());
    let v = moving.velocity;

    let axes = [
        AxisSweep::new_bounded(m_min.x, m_max.x, f_min.x, f_max.x, v.x),
        AxisSweep::new_bounded(m_min.y, m_max.y, f_min.y, f_max.y, v.y),
        AxisSweep::new_bounded(m_min.z, m_max.z, f_min.z, f_max.z, v.z),
    ];

    let mut dominant = 0;
    for (i, axis) in axes.iter().enumerate().skip(1) {
        if axis.entry > axes[dominant].entry {
            dominant = i;
        }
    }
    let entry_time = axes[dominant].entry;
    let exit_time = axes.iter().map(|a| a.exit).fold(f32::INFINITY, f32::min);

    if entry_time > exit_time || axes.iter().all(|a| a.entry < 0.0) || entry_time > 1.0 {
        return SweepHit::NONE;
    }

    let mut normal = Vec3::ZERO;
    normal[dominant] = axes[dominant].normal_sign();

    SweepHit {
        time: entry_time,
        normal,
    }
}
