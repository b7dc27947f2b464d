//! Hit geometry
//!
//! Every entity kind has its own hit shape that roughly follows the drawn
//! sprite: saws are round, bolts are a thin vertical strip, everything else is
//! the full box. The player's box is always a shrunk inset of the sprite.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind, HazardKind};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Shrink each side by a fraction of the size on that axis
    pub fn inset(&self, fx: f32, fy: f32) -> Rect {
        let pad = Vec2::new(self.size.x * fx, self.size.y * fy);
        Rect::new(self.min + pad, (self.size - pad * 2.0).max(Vec2::ZERO))
    }

    /// Point inside (or on) the rectangle closest to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Circle hit region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let nearest = rect.closest_point(self.center);
        nearest.distance_squared(self.center) < self.radius * self.radius
    }
}

/// Region of an entity that counts as a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    Box(Rect),
    Round(Circle),
}

impl HitShape {
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        match self {
            HitShape::Box(r) => r.overlaps(rect),
            HitShape::Round(c) => c.overlaps_rect(rect),
        }
    }
}

/// Hit shape for an entity in its current position
pub fn hit_shape(entity: &Entity, tuning: &Tuning) -> HitShape {
    let rect = entity.rect();
    match entity.kind {
        EntityKind::Hazard(HazardKind::Saw) => HitShape::Round(Circle {
            center: rect.center(),
            radius: entity.size.min_element() * tuning.saw_radius_factor,
        }),
        // Middle third of the sprite, where the bolt is actually drawn
        EntityKind::Hazard(HazardKind::ShockBolt) => HitShape::Box(Rect::new(
            Vec2::new(rect.min.x + rect.size.x / 3.0, rect.min.y),
            Vec2::new(rect.size.x / 3.0, rect.size.y),
        )),
        EntityKind::Hazard(HazardKind::Spikes | HazardKind::Bomb) | EntityKind::Pickup { .. } => {
            HitShape::Box(rect)
        }
    }
}

/// Whether `entity` currently touches the player's hit box
pub fn entity_hits(entity: &Entity, player_box: &Rect, tuning: &Tuning) -> bool {
    entity.is_armed(tuning.telegraph_window) && hit_shape(entity, tuning).overlaps_rect(player_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PickupKind;

    fn entity(kind: EntityKind, x: f32, y: f32) -> Entity {
        Entity {
            id: 1,
            kind,
            pos: Vec2::new(x, y),
            size: Vec2::splat(60.0),
            vy: 200.0,
            age: 1.0,
        }
    }

    fn player_box() -> Rect {
        Rect::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0))
    }

    #[test]
    fn test_rect_overlap_strict() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(a.overlaps(&Rect::new(Vec2::splat(5.0), Vec2::splat(10.0))));
        assert!(!a.overlaps(&Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0))));
        assert!(!a.overlaps(&Rect::new(Vec2::new(0.0, 20.0), Vec2::splat(10.0))));
    }

    #[test]
    fn test_inset() {
        let r = Rect::new(Vec2::ZERO, Vec2::new(100.0, 50.0)).inset(0.1, 0.2);
        assert_eq!(r.min, Vec2::new(10.0, 10.0));
        assert_eq!(r.size, Vec2::new(80.0, 30.0));
        let collapsed = Rect::new(Vec2::ZERO, Vec2::splat(10.0)).inset(0.8, 0.8);
        assert_eq!(collapsed.size, Vec2::ZERO);
    }

    #[test]
    fn test_saw_corner_miss() {
        let tuning = Tuning::default();
        let saw = entity(EntityKind::Hazard(HazardKind::Saw), 45.0, 45.0);
        let spikes = entity(EntityKind::Hazard(HazardKind::Spikes), 45.0, 45.0);
        // Both boxes overlap the player box corner...
        assert!(spikes.rect().overlaps(&player_box()));
        assert!(entity_hits(&spikes, &player_box(), &tuning));
        // ...but the saw's circle (r = 20.4 at centre 75,75) does not reach it
        assert!(!entity_hits(&saw, &player_box(), &tuning));
    }

    #[test]
    fn test_saw_edge_hit() {
        let tuning = Tuning::default();
        // Centre at (75, 150), 25px left of the box edge, radius 20.4
        let miss = entity(EntityKind::Hazard(HazardKind::Saw), 45.0, 120.0);
        assert!(!entity_hits(&miss, &player_box(), &tuning));
        // Centre at (85, 150), 15px left of the box edge
        let hit = entity(EntityKind::Hazard(HazardKind::Saw), 55.0, 120.0);
        assert!(entity_hits(&hit, &player_box(), &tuning));
    }

    #[test]
    fn test_bolt_uses_middle_third() {
        let tuning = Tuning::default();
        // Bolt strip spans x in [x + 20, x + 40]; player box starts at x = 100
        let grazing = entity(EntityKind::Hazard(HazardKind::ShockBolt), 45.0, 120.0);
        assert!(grazing.rect().overlaps(&player_box()));
        assert!(!entity_hits(&grazing, &player_box(), &tuning));
        let centred = entity(EntityKind::Hazard(HazardKind::ShockBolt), 70.0, 120.0);
        assert!(entity_hits(&centred, &player_box(), &tuning));
    }

    #[test]
    fn test_unarmed_hazard_never_hits() {
        let tuning = Tuning::default();
        let mut bomb = entity(EntityKind::Hazard(HazardKind::Bomb), 120.0, 120.0);
        bomb.age = 0.1;
        assert!(!entity_hits(&bomb, &player_box(), &tuning));
        bomb.age = 0.3;
        assert!(entity_hits(&bomb, &player_box(), &tuning));
    }

    #[test]
    fn test_pickup_full_box() {
        let tuning = Tuning::default();
        let bill = entity(
            EntityKind::Pickup {
                kind: PickupKind::Bill,
                value: 10,
            },
            41.0,
            41.0,
        );
        assert!(entity_hits(&bill, &player_box(), &tuning));
    }
}
