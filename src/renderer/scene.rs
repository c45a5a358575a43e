//! Scene geometry drawing: backdrop, stick figure, cigarette, ember and fog

use ember_smoke::burn::BurnModel;
use ember_smoke::config::cigarette;
use ember_smoke::pose::{CigaretteGeometry, Ember, FigurePose};
use ember_smoke::scene::Scene;
use femtovg::{Canvas, Color, LineCap, Paint, Path, renderer::OpenGl};
use glam::Vec2;

use crate::theme::{Theme, color, color_with_alpha};

pub struct SceneRenderer<'a> {
    canvas: &'a mut Canvas<OpenGl>,
    theme: &'a Theme,
    width: f32,
    height: f32,
}

impl<'a> SceneRenderer<'a> {
    pub fn new(canvas: &'a mut Canvas<OpenGl>, theme: &'a Theme, width: f32, height: f32) -> Self {
        Self {
            canvas,
            theme,
            width,
            height,
        }
    }

    /// Everything except the smoke, which is drawn between `draw` and `draw_fog`
    pub fn draw(&mut self, scene: &Scene) {
        self.draw_vignette(scene);

        if let Some(figure) = &scene.figure {
            self.draw_ground(figure.ground_y);
            self.draw_figure(figure, &scene.ember);
        }

        if let Some(geometry) = &scene.cigarette {
            self.draw_cigarette(geometry);
            self.draw_ember_glow(&scene.ember, geometry.glow_radius);
        }
    }

    /// Full-screen exhale haze
    pub fn draw_fog(&mut self, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let (w, h) = (self.width, self.height);
        let paint = Paint::radial_gradient(
            w * 0.6,
            h * 0.4,
            20.0,
            w,
            color_with_alpha(self.theme.smoke, alpha),
            color_with_alpha(self.theme.smoke, 0.0),
        );
        let mut path = Path::new();
        path.rect(0.0, 0.0, w, h);
        self.canvas.fill_path(&path, &paint);
    }

    fn draw_vignette(&mut self, scene: &Scene) {
        let (w, h) = (self.width, self.height);
        let edge = self.theme.vignette;

        // (center, inner radius, outer radius, center alpha)
        let (center, inner, outer, center_alpha) = match (scene.figure.is_some(), scene.mode.burn) {
            (true, _) => (Vec2::new(w * 0.45, h * 0.35), 30.0, w.max(h), 0.0),
            (false, BurnModel::ContinuousLoop) => {
                (Vec2::new(w * 0.5, h * 0.4), 40.0, w.max(h), 0.0)
            }
            (false, BurnModel::ElapsedDuration) => {
                (Vec2::new(w * 0.5, h * 0.5), 40.0, w, 0.1)
            }
        };

        let paint = Paint::radial_gradient(
            center.x,
            center.y,
            inner,
            outer,
            color_with_alpha(edge, center_alpha),
            color(edge),
        );
        let mut path = Path::new();
        path.rect(0.0, 0.0, w, h);
        self.canvas.fill_path(&path, &paint);
    }

    fn draw_ground(&mut self, ground_y: f32) {
        let mut paint = Paint::color(color(self.theme.ground));
        paint.set_line_width(2.0);

        let mut path = Path::new();
        path.move_to(self.width * 0.08, ground_y);
        path.line_to(self.width * 0.92, ground_y);
        self.canvas.stroke_path(&path, &paint);
    }

    fn draw_figure(&mut self, pose: &FigurePose, ember: &Ember) {
        let body_width = pose.stroke_width;
        let limb_width = pose.stroke_width * 0.8;

        // Torso and head
        let mut body = Path::new();
        body.move_to(pose.torso_top.x, pose.torso_top.y);
        body.line_to(pose.hip.x, pose.hip.y);
        body.circle(pose.head.x, pose.head.y, pose.head_radius);
        self.stroke(&body, color(self.theme.body), body_width);

        // Legs and the relaxed arm
        let mut limbs = Path::new();
        limbs.move_to(pose.hip.x, pose.hip.y);
        limbs.line_to(pose.left_foot.x, pose.left_foot.y);
        limbs.move_to(pose.hip.x, pose.hip.y);
        limbs.line_to(pose.right_foot.x, pose.right_foot.y);
        limbs.move_to(pose.shoulder.x, pose.shoulder.y);
        limbs.line_to(pose.left_elbow.x, pose.left_elbow.y);
        limbs.line_to(pose.left_hand.x, pose.left_hand.y);
        self.stroke(&limbs, color(self.theme.limbs), limb_width);

        let mut arm = Path::new();
        arm.move_to(pose.shoulder.x, pose.shoulder.y);
        arm.line_to(pose.right_arm.elbow.x, pose.right_arm.elbow.y);
        arm.line_to(pose.right_arm.hand.x, pose.right_arm.hand.y);
        self.stroke(&arm, color(self.theme.reach_arm), limb_width);

        let (filter_end, lit_end) = pose.cigarette;
        let mut cig = Path::new();
        cig.move_to(filter_end.x, filter_end.y);
        cig.line_to(lit_end.x, lit_end.y);
        self.stroke(
            &cig,
            color(self.theme.cigarette_stroke),
            (limb_width * 0.55).max(2.0),
        );

        let mut tip = Path::new();
        tip.circle(ember.position.x, ember.position.y, ember.radius);
        let tip_alpha = 0.15 + 0.55 * ember.brightness;
        self.canvas
            .fill_path(&tip, &Paint::color(color_with_alpha(self.theme.ember, tip_alpha)));

        let mut eyes = Path::new();
        for eye in pose.eyes {
            eyes.circle(eye.x, eye.y, pose.eye_radius);
        }
        self.canvas
            .fill_path(&eyes, &Paint::color(color(self.theme.eyes)));
    }

    fn draw_cigarette(&mut self, geo: &CigaretteGeometry) {
        let (body_start, body_end) = geo.body;

        let mut paper = Path::new();
        paper.rect(body_start, geo.y, (body_end - body_start).max(0.0), geo.height);
        self.canvas
            .fill_path(&paper, &Paint::color(color(self.theme.paper)));

        let mut filter = Path::new();
        filter.rect(geo.x, geo.y, geo.filter_len, geo.height);
        self.canvas
            .fill_path(&filter, &Paint::color(color(self.theme.filter)));

        let mut char_band = Path::new();
        char_band.rect(geo.char_x, geo.y, geo.char_width, geo.height);
        self.canvas
            .fill_path(&char_band, &Paint::color(color(self.theme.char_band)));

        let mut ash = Path::new();
        for i in 0..cigarette::ASH_SCRATCHES {
            let x = geo.char_x + 4.0 + i as f32 * 6.0;
            ash.move_to(x, geo.y + 2.0);
            ash.line_to(x - 2.0, geo.y + geo.height - 2.0);
        }
        let mut ash_paint = Paint::color(color(self.theme.ash));
        ash_paint.set_line_width(1.0);
        self.canvas.stroke_path(&ash, &ash_paint);
    }

    fn draw_ember_glow(&mut self, ember: &Ember, glow_radius: f32) {
        let Vec2 { x, y } = ember.position;

        let glow = Paint::radial_gradient(
            x,
            y,
            2.0,
            glow_radius,
            color_with_alpha(self.theme.ember, 0.6 * ember.brightness),
            color_with_alpha(self.theme.ember, 0.0),
        );
        let mut halo = Path::new();
        halo.circle(x, y, glow_radius);
        self.canvas.fill_path(&halo, &glow);

        let mut core = Path::new();
        core.circle(x, y, ember.radius);
        let core_alpha = 0.5 + 0.4 * ember.brightness;
        self.canvas.fill_path(
            &core,
            &Paint::color(color_with_alpha(self.theme.ember_core, core_alpha)),
        );
    }

    fn stroke(&mut self, path: &Path, stroke_color: Color, width: f32) {
        let mut paint = Paint::color(stroke_color);
        paint.set_line_width(width);
        paint.set_line_cap(LineCap::Round);
        self.canvas.stroke_path(path, &paint);
    }
}
