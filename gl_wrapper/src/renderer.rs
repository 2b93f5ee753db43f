use crate::geometry::Geometry;
use crate::program::Program;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    NotEqual,
    Always,
}

impl CompareFunc {
    fn gl_enum(&self) -> u32 {
        match self {
            CompareFunc::Never => gl::NEVER,
            CompareFunc::Less => gl::LESS,
            CompareFunc::Equal => gl::EQUAL,
            CompareFunc::LessEqual => gl::LEQUAL,
            CompareFunc::NotEqual => gl::NOTEQUAL,
            CompareFunc::Always => gl::ALWAYS,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
}

impl StencilOp {
    fn gl_enum(&self) -> u32 {
        match self {
            StencilOp::Keep => gl::KEEP,
            StencilOp::Zero => gl::ZERO,
            StencilOp::Replace => gl::REPLACE,
        }
    }
}

pub struct GlRenderer {
    current_program: u32,
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            if geometry.is_indexed() {
                crate::gl_call!(gl::DrawElements(
                    gl::TRIANGLES,
                    geometry.indices() as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null(),
                ));
            } else {
                crate::gl_call!(gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertices() as i32));
            }
            gl::BindVertexArray(0);
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Clears colour, depth and stencil together.
    pub fn clear_all(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT);
        }
    }

    pub fn set_depth_test(&self, enabled: bool) {
        unsafe { toggle(gl::DEPTH_TEST, enabled) }
    }

    pub fn set_depth_func(&self, func: CompareFunc) {
        unsafe { gl::DepthFunc(func.gl_enum()) }
    }

    pub fn set_stencil_test(&self, enabled: bool) {
        unsafe { toggle(gl::STENCIL_TEST, enabled) }
    }

    pub fn set_stencil_func(&self, func: CompareFunc, reference: i32, mask: u32) {
        unsafe { gl::StencilFunc(func.gl_enum(), reference, mask) }
    }

    pub fn set_stencil_op(&self, stencil_fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) {
        unsafe { gl::StencilOp(stencil_fail.gl_enum(), depth_fail.gl_enum(), pass.gl_enum()) }
    }

    pub fn set_stencil_mask(&self, mask: u32) {
        unsafe { gl::StencilMask(mask) }
    }

    /// Standard `src_alpha, 1 - src_alpha` blending.
    pub fn set_alpha_blending(&self, enabled: bool) {
        unsafe {
            toggle(gl::BLEND, enabled);
            if enabled {
                gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            }
        }
    }
}

unsafe fn toggle(cap: u32, enabled: bool) {
    if enabled {
        gl::Enable(cap);
    } else {
        gl::Disable(cap);
    }
}
