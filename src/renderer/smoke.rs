//! Smoke particle drawing
//!
//! Each puff is a rotated ellipse filled with a radial gradient that fades to
//! transparent at its rim. Puffs are composited additively so overlapping
//! smoke brightens.

use ember_smoke::smoke::SmokeParticle;
use femtovg::{Canvas, CompositeOperation, Paint, Path, renderer::OpenGl};

use crate::theme::{Rgba, color_with_alpha};

pub fn draw_particles(canvas: &mut Canvas<OpenGl>, particles: &[SmokeParticle], hue: Rgba) {
    canvas.save();
    canvas.global_composite_operation(CompositeOperation::Lighter);

    for particle in particles {
        if particle.radius <= 0.0 {
            continue;
        }

        canvas.save();
        canvas.translate(particle.x, particle.y);
        canvas.rotate(particle.rotation);

        let paint = Paint::radial_gradient(
            0.0,
            0.0,
            0.0,
            particle.radius,
            color_with_alpha(hue, particle.alpha),
            color_with_alpha(hue, 0.0),
        );
        let mut path = Path::new();
        path.ellipse(0.0, 0.0, particle.radius * 1.2, particle.radius * 0.9);
        canvas.fill_path(&path, &paint);

        canvas.restore();
    }

    canvas.restore();
}
