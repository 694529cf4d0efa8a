// Renderer struct that handles canvas 2d calls: clearing the surface,
// drawing each particle as a filled circle, and stroking the faint
// connection lines between nearby particles.

use crate::color::Color;
use crate::field::FieldState;
use crate::particle::Particle;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::CanvasRenderingContext2d;

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    pub const PARTICLE_COLOR: Color = Color::WHITE;
    pub const LINE_WIDTH: f64 = 1.0;

    // On creation grabs a reference to the 2d context from the canvas on
    // the DOM; None when the context is unavailable, in which case the
    // effect never starts
    pub fn new(canvas: &web_sys::HtmlCanvasElement) -> Option<Renderer> {
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Renderer { context })
    }

    pub fn render(&self, state: &FieldState) {
        self.clear_screen(state.width, state.height);
        self.render_particles(&state.particles);
        self.render_connections(&state.particles);
    }

    // Full clear every frame, no trails accumulate
    fn clear_screen(&self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    // Draw order is creation order
    fn render_particles(&self, particles: &[Particle]) {
        for p in particles {
            self.context.begin_path();
            let _ = self
                .context
                .arc(p.pos[0], p.pos[1], p.radius, 0.0, std::f64::consts::PI * 2.0);
            self.context.set_fill_style(&JsValue::from_str(
                &Renderer::PARTICLE_COLOR.to_rgba(p.opacity),
            ));
            self.context.fill();
        }
    }

    // All-pairs pass, each unordered pair visited once. Self-pairs are
    // skipped; a zero-length stroke draws nothing anyway. O(n^2) but n is
    // capped at FieldState::MAX_PARTICLES.
    fn render_connections(&self, particles: &[Particle]) {
        self.context.set_line_width(Renderer::LINE_WIDTH);
        for a in 0..particles.len() {
            for b in (a + 1)..particles.len() {
                let delta = vecmath::vec2_sub(particles[a].pos, particles[b].pos);
                let distance = vecmath::vec2_len(delta);
                if let Some(alpha) = FieldState::line_alpha(distance) {
                    self.context.set_stroke_style(&JsValue::from_str(
                        &Renderer::PARTICLE_COLOR.to_rgba(alpha),
                    ));
                    self.context.begin_path();
                    self.context.move_to(particles[a].pos[0], particles[a].pos[1]);
                    self.context.line_to(particles[b].pos[0], particles[b].pos[1]);
                    self.context.stroke();
                }
            }
        }
    }
}
