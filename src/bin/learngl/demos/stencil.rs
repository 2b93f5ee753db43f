use cgmath::{Matrix4, Vector3};

use gl_wrapper::geometry::Geometry;
use gl_wrapper::program::Program;
use gl_wrapper::renderer::{CompareFunc, StencilOp};
use gl_wrapper::texture::{Texture2D, TextureParams};

use learngl::assets::load_texture_or_checker;
use learngl::config::Settings;
use learngl::primitives::{CUBE, PLANE};

use super::{
    lit_geometry, program, set_transforms, Demo, DemoError, Frame, LAMP_VERT, LIT_VERT,
    TEXTURE_FRAG,
};

const OUTLINE_FRAG: &str = include_str!("../gl_shaders/outline.frag.glsl");

pub const OUTLINE_SCALE: f32 = 1.1;
const OUTLINE_COLOR: Vector3<f32> = Vector3::new(0.04, 0.28, 0.26);

const CUBES: [[f32; 3]; 2] = [[-1.0, 0.0, -1.0], [2.0, 0.0, 0.0]];

/// Cubes outlined by drawing scaled copies where the stencil was not written.
pub struct StencilDemo {
    textured: Program,
    outline: Program,
    cube: Geometry,
    plane: Geometry,
    marble: Texture2D,
    floor: Texture2D,
}

impl StencilDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        let params = TextureParams::default();

        let textured = program(LIT_VERT, TEXTURE_FRAG)?;
        textured.bind();
        textured.set_uniform("texture1", 0i32)?;

        let outline = program(LAMP_VERT, OUTLINE_FRAG)?;
        outline.bind();
        outline.set_uniform("outlineColor", OUTLINE_COLOR)?;

        Ok(Self {
            textured,
            outline,
            cube: lit_geometry(&CUBE)?,
            plane: lit_geometry(&PLANE)?,
            marble: load_texture_or_checker(settings.asset("textures/marble.jpg"), &params)?,
            floor: load_texture_or_checker(settings.asset("textures/metal.png"), &params)?,
        })
    }
}

pub fn outline_model(position: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position) * Matrix4::from_scale(OUTLINE_SCALE)
}

impl Demo for StencilDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        let (view, projection) = (frame.view(), frame.projection());
        let [cr, cg, cb] = frame.clear_color;
        let r = &mut *frame.renderer;

        r.set_depth_test(true);
        r.set_depth_func(CompareFunc::Less);
        r.set_stencil_test(true);
        r.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
        r.set_stencil_mask(0xFF);
        r.clear_all(cr, cg, cb);

        // the floor must not mark the stencil
        r.set_stencil_mask(0x00);
        r.use_program(&self.textured);
        self.floor.bind(0);
        set_transforms(&self.textured, Matrix4::from_scale(1.0), view, projection)?;
        r.draw(&self.plane, &self.textured);

        r.set_stencil_func(CompareFunc::Always, 1, 0xFF);
        r.set_stencil_mask(0xFF);
        self.marble.bind(0);
        for position in CUBES {
            let model = Matrix4::from_translation(Vector3::from(position));
            set_transforms(&self.textured, model, view, projection)?;
            r.draw(&self.cube, &self.textured);
        }

        r.set_stencil_func(CompareFunc::NotEqual, 1, 0xFF);
        r.set_stencil_mask(0x00);
        r.set_depth_test(false);
        r.use_program(&self.outline);
        for position in CUBES {
            let model = outline_model(Vector3::from(position));
            set_transforms(&self.outline, model, view, projection)?;
            r.draw(&self.cube, &self.outline);
        }

        r.set_stencil_mask(0xFF);
        r.set_stencil_func(CompareFunc::Always, 0, 0xFF);
        r.set_depth_test(true);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::{Point3, Transform};

    #[test]
    fn outline_grows_around_the_cube_centre() {
        let m = outline_model(Vector3::new(2.0, 0.0, 0.0));

        let corner = m.transform_point(Point3::new(0.5, 0.5, 0.5));
        assert_abs_diff_eq!(corner, Point3::new(2.55, 0.55, 0.55), epsilon = 1e-6);
    }
}
