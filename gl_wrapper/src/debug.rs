//! Checking of the GL error queue.
//!
//! `gl_call!` clears stale errors, evaluates the call and logs whatever the
//! driver reported with the call text and source position. Release builds
//! evaluate the call only.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{call} at {file}:{line} raised {}", .codes.iter().map(|c| error_name(*c)).collect::<Vec<_>>().join(", "))]
pub struct GlError {
    pub call: String,
    pub file: &'static str,
    pub line: u32,
    pub codes: Vec<u32>,
}

pub fn error_name(code: u32) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

// glGetError can keep reporting on a lost context
const MAX_DRAINED: usize = 32;

pub fn clear_errors() {
    for _ in 0..MAX_DRAINED {
        if unsafe { gl::GetError() } == gl::NO_ERROR {
            break;
        }
    }
}

pub fn check_errors(call: &str, file: &'static str, line: u32) -> Result<(), GlError> {
    let mut codes = Vec::new();

    for _ in 0..MAX_DRAINED {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }
        codes.push(code);
    }

    if codes.is_empty() {
        return Ok(());
    }

    let err = GlError {
        call: call.to_owned(),
        file,
        line,
        codes,
    };
    log::error!("[OpenGL Error] {err}");

    Err(err)
}

#[macro_export]
macro_rules! gl_call {
    ($e:expr) => {{
        if cfg!(debug_assertions) {
            $crate::debug::clear_errors();
            let value = $e;
            let _ = $crate::debug::check_errors(stringify!($e), file!(), line!());
            value
        } else {
            $e
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_for_known_codes() {
        assert_eq!(error_name(gl::INVALID_ENUM), "GL_INVALID_ENUM");
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(error_name(0xdead), "unknown GL error");
    }

    #[test]
    fn error_message_lists_every_code() {
        let err = GlError {
            call: "gl::DrawArrays(..)".into(),
            file: "demo.rs",
            line: 7,
            codes: vec![gl::INVALID_VALUE, gl::INVALID_OPERATION],
        };

        assert_eq!(
            err.to_string(),
            "gl::DrawArrays(..) at demo.rs:7 raised GL_INVALID_VALUE, GL_INVALID_OPERATION"
        );
    }
}
