use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, CString};
use std::path::Path;
use thiserror::Error;

use cgmath::{Matrix, Matrix3, Matrix4, Vector3, Vector4};

const INFO_LOG_SIZE: usize = 1024;

pub struct ProgramBuilder {
    vert: String,
    frag: String,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: vert_src.to_owned(),
            frag: frag_src.to_owned(),
        }
    }

    /// Reads both stages from disk. Nothing is compiled until [`ProgramBuilder::build`].
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        vert_path: P,
        frag_path: Q,
    ) -> Result<Self, ProgramError> {
        let vert = std::fs::read_to_string(vert_path.as_ref())
            .map_err(|e| ProgramError::Io(vert_path.as_ref().display().to_string(), e))?;
        let frag = std::fs::read_to_string(frag_path.as_ref())
            .map_err(|e| ProgramError::Io(frag_path.as_ref().display().to_string(), e))?;

        Ok(Self { vert, frag })
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        let vert_src = CString::new(self.vert).map_err(|_| ProgramError::InvalidSource)?;
        let frag_src = CString::new(self.frag).map_err(|_| ProgramError::InvalidSource)?;

        let vert = compile_stage(gl::VERTEX_SHADER, &vert_src)
            .map_err(ProgramError::VertexCompilation)?;

        let frag = match compile_stage(gl::FRAGMENT_SHADER, &frag_src) {
            Ok(f) => f,
            Err(log) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(ProgramError::FragmentCompilation(log));
            }
        };

        let mut success: i32 = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let mut buf = [0_u8; INFO_LOG_SIZE];

                gl::GetProgramInfoLog(
                    program,
                    INFO_LOG_SIZE as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                return Err(ProgramError::Linking(info_log_to_string(&buf)));
            }

            log::debug!("linked shader program {program}");

            Ok(Program { id: program })
        }
    }
}

fn compile_stage(kind: GLenum, src: &CString) -> Result<GLuint, String> {
    let mut success: i32 = 0;

    unsafe {
        let shader = gl::CreateShader(kind);

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
        if success != 1 {
            let mut buf = [0_u8; INFO_LOG_SIZE];

            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_SIZE as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            return Err(info_log_to_string(&buf));
        }

        Ok(shader)
    }
}

/// Driver logs are NUL terminated inside a fixed buffer.
pub fn info_log_to_string(buf: &[u8]) -> String {
    let data = match buf.iter().position(|b| *b == 0) {
        Some(end) => &buf[..end],
        None => buf,
    };

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("could not read shader source {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("shader source contains a NUL byte")]
    InvalidSource,
    #[error("vertex shader compilation failed: {0}")]
    VertexCompilation(String),
    #[error("fragment shader compilation failed: {0}")]
    FragmentCompilation(String),
    #[error("shader program linking failed: {0}")]
    Linking(String),
    #[error("no active uniform named '{0}'")]
    UnknownUniform(String),
}

/// Values that can be pushed into a uniform location of the bound program.
pub trait Uniform {
    /// # Safety
    /// A GL context must be current and the owning program bound.
    unsafe fn apply(&self, location: GLint);
}

impl Uniform for bool {
    unsafe fn apply(&self, location: GLint) {
        gl::Uniform1i(location, *self as i32);
    }
}

impl Uniform for i32 {
    unsafe fn apply(&self, location: GLint) {
        gl::Uniform1i(location, *self);
    }
}

impl Uniform for u32 {
    unsafe fn apply(&self, location: GLint) {
        gl::Uniform1i(location, *self as i32);
    }
}

impl Uniform for f32 {
    unsafe fn apply(&self, location: GLint) {
        gl::Uniform1f(location, *self);
    }
}

impl Uniform for (f32, f32, f32) {
    unsafe fn apply(&self, location: GLint) {
        gl::Uniform3f(location, self.0, self.1, self.2);
    }
}

impl Uniform for Vector3<f32> {
    unsafe fn apply(&self, location: GLint) {
        gl::Uniform3f(location, self.x, self.y, self.z);
    }
}

impl Uniform for Vector4<f32> {
    unsafe fn apply(&self, location: GLint) {
        gl::Uniform4f(location, self.x, self.y, self.z, self.w);
    }
}

impl Uniform for Matrix3<f32> {
    unsafe fn apply(&self, location: GLint) {
        gl::UniformMatrix3fv(location, 1, gl::FALSE, self.as_ptr());
    }
}

impl Uniform for Matrix4<f32> {
    unsafe fn apply(&self, location: GLint) {
        gl::UniformMatrix4fv(location, 1, gl::FALSE, self.as_ptr());
    }
}

impl<T: Uniform> Uniform for &T {
    unsafe fn apply(&self, location: GLint) {
        (*self).apply(location);
    }
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    pub fn uniform_location(&self, name: &str) -> Result<GLint, ProgramError> {
        let c_name =
            CString::new(name).map_err(|_| ProgramError::UnknownUniform(name.to_owned()))?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        if location == -1 {
            return Err(ProgramError::UnknownUniform(name.to_owned()));
        }

        Ok(location)
    }

    /// Sets a uniform on this program, which must be the one currently bound.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) -> Result<(), ProgramError> {
        let location = self.uniform_location(name)?;

        unsafe { value.apply(location) };

        Ok(())
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = [0_u8; 32];
        buf[..13].copy_from_slice(b"0:1: error X\n");

        assert_eq!(info_log_to_string(&buf), "0:1: error X");
    }

    #[test]
    fn info_log_without_terminator() {
        assert_eq!(info_log_to_string(b"link failed"), "link failed");
    }

    #[test]
    fn missing_source_file_is_io_error() {
        let dir = std::env::temp_dir().join("gl_wrapper_missing_shader");
        let res = ProgramBuilder::from_files(dir.join("a.vert"), dir.join("a.frag"));

        match res {
            Err(ProgramError::Io(path, _)) => assert!(path.ends_with("a.vert")),
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn sources_read_from_disk() {
        let dir = std::env::temp_dir().join(format!("gl_wrapper_shader_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("s.vert"), "void main() {}").unwrap();
        std::fs::write(dir.join("s.frag"), "out vec4 c;").unwrap();

        let builder = ProgramBuilder::from_files(dir.join("s.vert"), dir.join("s.frag")).unwrap();

        assert_eq!(builder.vert, "void main() {}");
        assert_eq!(builder.frag, "out vec4 c;");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn nul_in_source_is_rejected_before_compiling() {
        let res = ProgramBuilder::new("void main() {}\0", "void main() {}").build();

        assert!(matches!(res, Err(ProgramError::InvalidSource)));
    }
}
