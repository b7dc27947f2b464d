//! Canvas 2D backend

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::shapes::{self, colors};
use super::{FrameView, RenderAdapter};
use crate::sim::{Entity, EntityKind, HazardKind, PickupKind, Player};

/// Draws into a 2D context already scaled to CSS pixels
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    face: Option<HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, face: Option<HtmlImageElement>) -> Self {
        Self { ctx, face }
    }

    /// Shown instead of the game when assets fail to load
    pub fn draw_error(&self, width: f32, height: f32, message: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(colors::BACKGROUND);
        ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
        ctx.set_fill_style_str("#fff");
        ctx.set_font("16px system-ui");
        ctx.set_text_align("left");
        ctx.fill_text(message, 20.0, 40.0).ok();
    }

    fn round_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let ctx = &self.ctx;
        let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r).ok();
        ctx.arc_to(x + w, y + h, x, y + h, r).ok();
        ctx.arc_to(x, y + h, x, y, r).ok();
        ctx.arc_to(x, y, x + w, y, r).ok();
        ctx.close_path();
    }

    fn circle(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .ok();
    }

    fn polygon(&self, points: &[Vec2]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        if let Some((first, rest)) = points.split_first() {
            ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        ctx.close_path();
    }

    fn draw_background(&self, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let w = view.arena.width as f64;
        let h = view.arena.height as f64;
        let wall_h = h * 0.46;

        ctx.set_fill_style_str(colors::WALL);
        ctx.fill_rect(0.0, 0.0, w, wall_h);
        ctx.set_fill_style_str(colors::FLOOR);
        ctx.fill_rect(0.0, wall_h, w, h - wall_h);

        // Floor planks scroll toward the player
        let plank = (h * 0.045).floor().max(22.0);
        let scroll = if view.reduced_motion {
            0.0
        } else {
            (view.time as f64 * 140.0) % plank
        };
        ctx.set_global_alpha(0.22);
        ctx.set_fill_style_str("#3a2a1f");
        let mut y = wall_h - plank;
        while y < h + plank {
            ctx.fill_rect(0.0, y + scroll, w, 2.0);
            y += plank;
        }
        ctx.set_global_alpha(1.0);

        ctx.set_stroke_style_str(colors::FLOOR_LINE);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        let line_y = wall_h + (h - wall_h) * 0.25;
        ctx.move_to(0.0, line_y);
        ctx.line_to(w, line_y);
        let cx = w * 0.5;
        let cy = wall_h + (h - wall_h) * 0.55;
        let r = w.min(h) * 0.14;
        ctx.move_to(cx + r, cy);
        ctx.arc(cx, cy, r, 0.0, TAU).ok();
        ctx.stroke();
    }

    fn draw_entity(&self, entity: &Entity, view: &FrameView<'_>) {
        match entity.kind {
            EntityKind::Pickup {
                kind: PickupKind::Bucket,
                ..
            } => self.draw_bucket(entity, view),
            EntityKind::Pickup {
                kind: PickupKind::Bill,
                ..
            } => self.draw_bill(entity, view),
            EntityKind::Hazard(HazardKind::Spikes) => self.draw_spikes(entity),
            EntityKind::Hazard(HazardKind::Saw) => self.draw_saw(entity, view),
            EntityKind::Hazard(HazardKind::Bomb) => self.draw_bomb(entity, view),
            EntityKind::Hazard(HazardKind::ShockBolt) => self.draw_bolt(entity, view),
        }
    }

    /// Translate to the sprite centre and tilt
    fn begin_tilted(&self, entity: &Entity, view: &FrameView<'_>) -> (f64, f64) {
        let ctx = &self.ctx;
        let w = entity.size.x as f64;
        let h = entity.size.y as f64;
        ctx.save();
        ctx.translate(entity.pos.x as f64 + w / 2.0, entity.pos.y as f64 + h / 2.0)
            .ok();
        ctx.rotate(shapes::wobble(view.time, entity.pos.x, view.reduced_motion) as f64)
            .ok();
        ctx.translate(-w / 2.0, -h / 2.0).ok();
        (w, h)
    }

    fn draw_bucket(&self, entity: &Entity, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let (w, h) = self.begin_tilted(entity, view);
        let (bx, by, bw, bh) = (w * 0.14, h * 0.22, w * 0.72, h * 0.70);
        let radius = (w * 0.18).max(12.0);

        self.round_rect(bx, by, bw, bh, radius);
        ctx.save();
        ctx.clip();
        let stripes = 4;
        for i in 0..stripes {
            ctx.set_fill_style_str(if i % 2 == 0 {
                colors::BUCKET_STRIPE
            } else {
                colors::BUCKET
            });
            let sx = bx + i as f64 * bw / stripes as f64;
            ctx.fill_rect(sx, by, bw / stripes as f64, bh);
        }
        ctx.set_fill_style_str("#e8e9f2");
        ctx.fill_rect(bx, by, bw, bh * 0.14);
        ctx.restore();

        ctx.set_stroke_style_str("rgba(0,0,0,0.45)");
        ctx.set_line_width((w * 0.045).max(2.0));
        self.round_rect(bx, by, bw, bh, radius);
        ctx.stroke();

        // Wings heaped on top
        ctx.set_fill_style_str("#c7772b");
        for i in 0..6 {
            let px = w * 0.5 + (i as f64 - 2.5) * w * 0.10;
            let py = h * 0.12 + (i % 2) as f64 * h * 0.05;
            ctx.begin_path();
            ctx.ellipse(px, py, w * 0.11, h * 0.07, (i as f64 - 2.5) * 0.08, 0.0, TAU)
                .ok();
            ctx.fill();
        }

        self.label("KFC", w * 0.5, h * 0.62, (w * 0.28).floor().max(14.0));
        ctx.restore();
    }

    fn draw_bill(&self, entity: &Entity, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let (w, h) = self.begin_tilted(entity, view);
        let (bx, by, bw, bh) = (w * 0.06, h * 0.23, w * 0.88, h * 0.56);
        let radius = (w * 0.12).max(10.0);

        ctx.set_fill_style_str(shapes::fill_color(&entity.kind));
        self.round_rect(bx, by, bw, bh, radius);
        ctx.fill();
        ctx.set_stroke_style_str("rgba(0,0,0,0.50)");
        ctx.set_line_width((w * 0.04).max(2.0));
        ctx.stroke();

        ctx.set_fill_style_str(colors::BILL_INK);
        ctx.set_font(&format!("900 {}px system-ui", (w * 0.40).floor().max(16.0)));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text("$", w * 0.5, h * 0.51).ok();
        ctx.restore();
    }

    fn draw_spikes(&self, entity: &Entity) {
        let ctx = &self.ctx;
        let (base_min, base_size) = shapes::spike_base(entity.pos, entity.size);
        ctx.set_fill_style_str(colors::SPIKE_BASE);
        self.round_rect(
            base_min.x as f64,
            base_min.y as f64,
            base_size.x as f64,
            base_size.y as f64,
            10.0,
        );
        ctx.fill();

        ctx.set_fill_style_str(shapes::fill_color(&entity.kind));
        for tri in shapes::spike_triangles(entity.pos, entity.size, 5) {
            self.polygon(&tri);
            ctx.fill();
        }
    }

    fn draw_saw(&self, entity: &Entity, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let center = entity.rect().center();
        let r = entity.size.min_element() * 0.45;
        let spin = if view.reduced_motion { 0.0 } else { view.time * 8.0 };

        ctx.set_fill_style_str(shapes::fill_color(&entity.kind));
        self.polygon(&shapes::saw_outline(center, r, spin, 12));
        ctx.fill();
        ctx.set_fill_style_str(colors::SAW_HUB);
        self.circle(center, r * 0.72);
        ctx.fill();
        ctx.set_fill_style_str(colors::BACKGROUND);
        self.circle(center, r * 0.18);
        ctx.fill();
    }

    fn draw_bomb(&self, entity: &Entity, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let center = entity.rect().center();
        let r = entity.size.min_element() * 0.42;
        let (cx, cy, rf) = (center.x as f64, center.y as f64, r as f64);

        ctx.save();
        ctx.set_global_alpha(
            shapes::charge_alpha(entity.age, view.telegraph_window, view.reduced_motion) as f64,
        );
        ctx.set_fill_style_str(shapes::fill_color(&entity.kind));
        self.circle(center, r);
        ctx.fill();

        ctx.set_stroke_style_str(colors::FUSE);
        ctx.set_line_width((rf * 0.12).max(3.0));
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(cx, cy - rf * 0.95);
        ctx.quadratic_curve_to(cx + rf * 0.7, cy - rf * 1.2, cx + rf * 0.9, cy - rf * 0.65);
        ctx.stroke();

        let spark = shapes::fuse_spark(view.time);
        ctx.set_fill_style_str(&format!("rgba(255, 200, 60, {})", 0.9 * spark));
        self.circle(center + Vec2::new(r * 0.9, -r * 0.65), r * 0.18 * spark);
        ctx.fill();
        ctx.restore();
    }

    fn draw_bolt(&self, entity: &Entity, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let pulse = 0.75 + 0.25 * (view.time * 10.0).sin();
        let charge = shapes::charge_alpha(entity.age, view.telegraph_window, view.reduced_motion);
        ctx.save();
        ctx.set_global_alpha((0.9 * pulse * charge) as f64);
        ctx.set_fill_style_str(shapes::fill_color(&entity.kind));
        self.polygon(&shapes::bolt_polygon(entity.pos, entity.size));
        ctx.fill();
        ctx.restore();
    }

    fn draw_player(&self, player: &Player, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);
        let (w, h) = (player.size.x as f64, player.size.y as f64);

        ctx.save();
        ctx.set_global_alpha(
            shapes::player_alpha(player.invuln, view.time, view.reduced_motion) as f64,
        );

        let (body_x, body_y, body_w, body_h) = (x + w * 0.18, y + h * 0.35, w * 0.64, h * 0.56);
        ctx.set_fill_style_str(colors::SHIRT);
        self.round_rect(body_x, body_y, body_w, body_h, 18.0);
        ctx.fill();
        self.label(
            "DC",
            x + w * 0.5,
            body_y + body_h * 0.52,
            (w * 0.26).floor().max(16.0),
        );

        // Portrait clipped to the head
        let face_r = (w * 0.28).floor();
        let face = Vec2::new((x + w * 0.5) as f32, (y + h * 0.22) as f32);
        ctx.set_fill_style_str(colors::BACKGROUND);
        self.circle(face, face_r as f32 + 4.0);
        ctx.fill();
        if let Some(image) = &self.face {
            ctx.save();
            self.circle(face, face_r as f32);
            ctx.clip();
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                face.x as f64 - face_r,
                face.y as f64 - face_r,
                face_r * 2.0,
                face_r * 2.0,
            )
            .ok();
            ctx.restore();
        }

        if player.is_slowed()
            && !shapes::player_flash_dimmed(player.invuln, view.time, view.reduced_motion)
        {
            ctx.set_global_alpha(0.35 + 0.25 * (view.time as f64 * 12.0).sin());
            ctx.set_stroke_style_str(colors::BOLT);
            ctx.set_line_width((w * 0.05).floor().max(3.0));
            self.circle(face, face_r as f32 + 10.0);
            ctx.stroke();
        }

        // Legs
        ctx.set_global_alpha(
            shapes::player_alpha(player.invuln, view.time, view.reduced_motion) as f64,
        );
        ctx.set_fill_style_str(colors::INK);
        let leg_w = (w * 0.16).floor();
        let leg_h = (h * 0.16).floor();
        let stride = if view.reduced_motion {
            0.0
        } else {
            let slow = if player.is_slowed() { 0.6 } else { 1.0 };
            (view.time as f64 * 14.0).sin() * 6.0 * slow
        };
        ctx.fill_rect(x + (w * 0.30).floor(), y + h - leg_h, leg_w, leg_h + stride);
        ctx.fill_rect(x + (w * 0.58).floor(), y + h - leg_h, leg_w, leg_h - stride);

        ctx.restore();
    }

    /// Bold outlined text centred on (x, y)
    fn label(&self, text: &str, x: f64, y: f64, size: f64) {
        let ctx = &self.ctx;
        ctx.set_font(&format!("900 {}px system-ui", size));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_line_width((size * 0.2).max(3.0));
        ctx.set_stroke_style_str("rgba(0,0,0,0.30)");
        ctx.stroke_text(text, x, y).ok();
        ctx.set_fill_style_str(colors::INK);
        ctx.fill_text(text, x, y).ok();
    }

    fn draw_game_over(&self, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        let w = view.arena.width as f64;
        let h = view.arena.height as f64;

        ctx.save();
        ctx.set_global_alpha(0.62);
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_global_alpha(1.0);

        ctx.set_text_align("center");
        ctx.set_text_baseline("alphabetic");
        ctx.set_fill_style_str(colors::TEXT);
        ctx.set_font("800 34px system-ui");
        ctx.fill_text("GAME OVER", w / 2.0, h * 0.45).ok();

        ctx.set_font("600 16px system-ui");
        ctx.set_global_alpha(0.9);
        let summary = format!(
            "Score: {}   •   Best: {}",
            view.session.score, view.session.best_score
        );
        ctx.fill_text(&summary, w / 2.0, h * 0.45 + 34.0).ok();
        ctx.fill_text("Press Enter or Restart", w / 2.0, h * 0.45 + 60.0)
            .ok();
        ctx.restore();
    }
}

impl RenderAdapter for CanvasRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.ctx.set_fill_style_str(colors::BACKGROUND);
        self.ctx.fill_rect(
            0.0,
            0.0,
            view.arena.width as f64,
            view.arena.height as f64,
        );
        self.draw_background(view);

        for entity in view.entities {
            self.draw_entity(entity, view);
        }
        self.draw_player(view.player, view);

        if view.session.game_over() {
            self.draw_game_over(view);
        }
    }
}
