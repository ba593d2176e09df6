use std::fmt::Write;

use frontline_scene::Scene;

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene.
    fn render(&self, scene: &Scene) -> Self::Output;
}

/// Human-readable dump of the scene, one object per line.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Include the static layout (ground, light) above the dynamic state.
    pub show_layout: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout() -> Self {
        Self { show_layout: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "=== Scene (tick={}) ===", scene.tick());

        if self.show_layout {
            let layout = scene.layout();
            let _ = writeln!(
                out,
                "Ground: {:.0}x{:.0} subdivisions={}",
                layout.ground.width, layout.ground.depth, layout.ground.subdivisions
            );
            let _ = writeln!(
                out,
                "Light: dir=({:.1}, {:.1}, {:.1}) intensity={:.2}",
                layout.light.direction.x,
                layout.light.direction.y,
                layout.light.direction.z,
                layout.light.intensity
            );
        }

        let p = scene.player().position;
        let _ = writeln!(out, "Player: pos=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);

        let camera = scene.camera();
        let eye = camera.position;
        let target = camera.look_target();
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})",
            eye.x, eye.y, eye.z, target.x, target.y, target.z
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontline_common::MovementTarget;
    use frontline_scene::MovementSink;
    use glam::Vec3;

    #[test]
    fn renders_initial_scene() {
        let output = DebugTextRenderer::new().render(&Scene::default());
        assert!(output.contains("tick=0"));
        assert!(output.contains("Player: pos=(0.00, 0.00, 0.00)"));
        assert!(output.contains("Camera: eye=(0.00, 5.00, -10.00)"));
        assert!(!output.contains("Ground"));
    }

    #[test]
    fn renders_moved_objects() {
        let mut scene = Scene::default();
        scene.apply_delta(MovementTarget::Player, Vec3::new(1.5, 0.0, -2.0));
        scene.apply_delta(MovementTarget::Camera, Vec3::new(0.0, 0.0, 1.0));
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("Player: pos=(1.50, 0.00, -2.00)"));
        assert!(output.contains("eye=(0.00, 5.00, -9.00)"));
    }

    #[test]
    fn layout_section_is_optional() {
        let output = DebugTextRenderer::with_layout().render(&Scene::default());
        assert!(output.contains("Ground: 100x100 subdivisions=1"));
        assert!(output.contains("intensity=0.70"));
    }
}
