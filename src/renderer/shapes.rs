//! Shape generation for sprite primitives
//!
//! Pure geometry in arena pixels; the canvas backend only strokes and fills
//! what comes out of here.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::sim::{EntityKind, HazardKind, PickupKind};

/// Flash toggles this many times per second while invulnerable
const FLASH_RATE: f32 = 14.0;
/// Saw tooth tips stick out this far past the blade radius
const SAW_TOOTH_REACH: f32 = 1.15;
/// Arming hazards flicker this many times per second
const CHARGE_FLICKER_RATE: f32 = 20.0;
/// Spike tips occupy the top part of the sprite; the base is below
const SPIKE_BASE_FRACTION: f32 = 0.55;

/// Lightning-bolt outline inside the sprite rect
pub fn bolt_polygon(min: Vec2, size: Vec2) -> [Vec2; 6] {
    let p = |fx: f32, fy: f32| min + Vec2::new(size.x * fx, size.y * fy);
    [
        p(0.55, 0.0),
        p(0.25, 0.55),
        p(0.52, 0.55),
        p(0.35, 1.0),
        p(0.78, 0.42),
        p(0.52, 0.42),
    ]
}

/// Closed saw-blade outline: three points per tooth (root, tip, root)
pub fn saw_outline(center: Vec2, radius: f32, angle: f32, teeth: u32) -> Vec<Vec2> {
    let teeth = teeth.max(3);
    let mut points = Vec::with_capacity((teeth * 3) as usize);
    let step = TAU / teeth as f32;

    for i in 0..teeth {
        let a0 = angle + i as f32 * step;
        let a1 = a0 + step * 0.5;
        let a2 = a0 + step;
        points.push(center + Vec2::from_angle(a0) * radius);
        points.push(center + Vec2::from_angle(a1) * radius * SAW_TOOTH_REACH);
        points.push(center + Vec2::from_angle(a2) * radius);
    }

    points
}

/// Row of spike triangles pointing up, tips on the sprite's top edge
pub fn spike_triangles(min: Vec2, size: Vec2, count: u32) -> Vec<[Vec2; 3]> {
    let count = count.max(1);
    let base_y = min.y + size.y * SPIKE_BASE_FRACTION;
    let width = size.x / count as f32;

    (0..count)
        .map(|i| {
            let x0 = min.x + i as f32 * width;
            let x1 = x0 + width;
            [
                Vec2::new(x0, base_y),
                Vec2::new((x0 + x1) * 0.5, min.y),
                Vec2::new(x1, base_y),
            ]
        })
        .collect()
}

/// Base plate under the spikes: (min, size)
pub fn spike_base(min: Vec2, size: Vec2) -> (Vec2, Vec2) {
    let top = size.y * SPIKE_BASE_FRACTION;
    (
        Vec2::new(min.x, min.y + top),
        Vec2::new(size.x, size.y - top),
    )
}

/// Whether the player is in the dim half of its invulnerability flash
pub fn player_flash_dimmed(invuln: f32, time: f32, reduced_motion: bool) -> bool {
    if reduced_motion || invuln <= 0.0 {
        return false;
    }
    (time * FLASH_RATE).floor() as i64 % 2 == 0
}

/// Opacity for the player sprite this frame
pub fn player_alpha(invuln: f32, time: f32, reduced_motion: bool) -> f32 {
    if player_flash_dimmed(invuln, time, reduced_motion) {
        0.55
    } else {
        1.0
    }
}

/// Small rocking angle for pickups, in radians
pub fn wobble(time: f32, x: f32, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 0.0;
    }
    (time * 7.0 + x * 0.03).sin() * 0.06
}

/// 0.2..=1.0 fuse spark intensity
pub fn fuse_spark(time: f32) -> f32 {
    0.6 + 0.4 * (time * 16.0).sin()
}

/// Opacity of a telegraphed hazard: faint and flickering while it arms,
/// fading in toward solid, then 1.0 once it can hit
pub fn charge_alpha(age: f32, telegraph_window: f32, reduced_motion: bool) -> f32 {
    if telegraph_window <= 0.0 || age >= telegraph_window {
        return 1.0;
    }
    let ramp = 0.35 + 0.45 * (age / telegraph_window).max(0.0);
    if !reduced_motion && (age * CHARGE_FLICKER_RATE).floor() as i64 % 2 == 1 {
        ramp * 0.5
    } else {
        ramp
    }
}

/// Fill color keyed on the entity tag
pub fn fill_color(kind: &EntityKind) -> &'static str {
    match kind {
        EntityKind::Pickup {
            kind: PickupKind::Bucket,
            ..
        } => colors::BUCKET,
        EntityKind::Pickup {
            kind: PickupKind::Bill,
            ..
        } => colors::BILL,
        EntityKind::Hazard(HazardKind::Spikes) => colors::SPIKES,
        EntityKind::Hazard(HazardKind::Saw) => colors::SAW,
        EntityKind::Hazard(HazardKind::Bomb) => colors::BOMB,
        EntityKind::Hazard(HazardKind::ShockBolt) => colors::BOLT,
    }
}

/// Colors for game elements (CSS)
pub mod colors {
    pub const BACKGROUND: &str = "#0b0f14";
    pub const WALL: &str = "#1a2330";
    pub const FLOOR: &str = "#1a1410";
    pub const FLOOR_LINE: &str = "rgba(230, 230, 230, 0.35)";
    pub const BUCKET: &str = "#fbfbff";
    pub const BUCKET_STRIPE: &str = "#cf1f22";
    pub const BILL: &str = "#2fbe69";
    pub const BILL_INK: &str = "#063a1f";
    pub const SPIKES: &str = "#cfd6e6";
    pub const SPIKE_BASE: &str = "#2a2f3a";
    pub const SAW: &str = "#d7deef";
    pub const SAW_HUB: &str = "#8b93a8";
    pub const BOMB: &str = "#1b1f28";
    pub const FUSE: &str = "#caa24a";
    pub const BOLT: &str = "rgb(160, 220, 255)";
    pub const SHIRT: &str = "#f6f7fb";
    pub const INK: &str = "#111823";
    pub const TEXT: &str = "#e9eef5";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bolt_inside_sprite() {
        let min = Vec2::new(100.0, 50.0);
        let size = Vec2::new(60.0, 60.0);
        for p in bolt_polygon(min, size) {
            assert!(p.x >= min.x && p.x <= min.x + size.x);
            assert!(p.y >= min.y && p.y <= min.y + size.y);
        }
    }

    #[test]
    fn test_saw_outline_radii() {
        let center = Vec2::new(10.0, 20.0);
        let points = saw_outline(center, 30.0, 0.4, 12);
        assert_eq!(points.len(), 36);

        for (i, p) in points.iter().enumerate() {
            let r = p.distance(center);
            let expected = if i % 3 == 1 { 30.0 * SAW_TOOTH_REACH } else { 30.0 };
            assert!((r - expected).abs() < 1e-3, "point {} at radius {}", i, r);
        }
    }

    #[test]
    fn test_spikes_span_sprite() {
        let min = Vec2::new(0.0, 100.0);
        let size = Vec2::new(50.0, 40.0);
        let spikes = spike_triangles(min, size, 5);
        assert_eq!(spikes.len(), 5);
        assert_eq!(spikes[0][0].x, 0.0);
        assert!((spikes[4][2].x - 50.0).abs() < 1e-4);
        for [left, tip, right] in &spikes {
            assert_eq!(tip.y, 100.0);
            assert!((left.y - 122.0).abs() < 1e-4);
            assert_eq!(left.y, right.y);
        }

        let (base_min, base_size) = spike_base(min, size);
        assert!((base_min.y + base_size.y - 140.0).abs() < 1e-4);
    }

    #[test]
    fn test_flash_alternates() {
        // 1/14 s per phase
        assert!(player_flash_dimmed(0.5, 0.01, false));
        assert!(!player_flash_dimmed(0.5, 0.08, false));
        assert!(!player_flash_dimmed(0.0, 0.01, false));
        assert!(!player_flash_dimmed(0.5, 0.01, true));
        assert_eq!(player_alpha(0.5, 0.01, true), 1.0);
    }

    #[test]
    fn test_charge_alpha_distinguishes_arming() {
        assert_eq!(charge_alpha(0.3, 0.3, false), 1.0);
        assert_eq!(charge_alpha(2.0, 0.3, false), 1.0);
        assert_eq!(charge_alpha(0.0, 0.0, false), 1.0);
        assert!((charge_alpha(0.0, 0.3, false) - 0.35).abs() < 1e-6);

        // Flicker off-phase at 0.06 s, steady under reduced motion
        let steady = charge_alpha(0.06, 0.3, true);
        assert!((steady - 0.44).abs() < 1e-5);
        assert!((charge_alpha(0.06, 0.3, false) - steady * 0.5).abs() < 1e-5);

        for i in 0..30 {
            let age = i as f32 * 0.01;
            assert!(charge_alpha(age, 0.3, false) < 1.0);
            assert!(charge_alpha(age, 0.3, true) < 1.0);
        }
    }

    #[test]
    fn test_colors_by_tag() {
        let bill = EntityKind::Pickup {
            kind: PickupKind::Bill,
            value: 10,
        };
        assert_eq!(fill_color(&bill), colors::BILL);
        assert_eq!(
            fill_color(&EntityKind::Hazard(HazardKind::Saw)),
            colors::SAW
        );
    }
}
