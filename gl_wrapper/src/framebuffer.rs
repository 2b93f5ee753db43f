use thiserror::Error;

use crate::texture::Texture2D;

pub struct FrameBuffer {
    id: u32,
    depth_stencil: u32,
}

impl FrameBuffer {
    /// Colour goes to `texture`, depth and stencil to an owned renderbuffer.
    pub fn with_color_texture(texture: &Texture2D) -> Result<Self, FramebufferError> {
        let mut id = 0;
        let mut rbo = 0;

        let status = unsafe {
            gl::GenFramebuffers(1, (&mut id) as *mut u32);
            gl::BindFramebuffer(gl::FRAMEBUFFER, id);

            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::COLOR_ATTACHMENT0,
                gl::TEXTURE_2D,
                texture.id,
                0,
            );

            gl::GenRenderbuffers(1, (&mut rbo) as *mut u32);
            gl::BindRenderbuffer(gl::RENDERBUFFER, rbo);
            gl::RenderbufferStorage(
                gl::RENDERBUFFER,
                gl::DEPTH24_STENCIL8,
                texture.width() as i32,
                texture.height() as i32,
            );
            gl::BindRenderbuffer(gl::RENDERBUFFER, 0);

            gl::FramebufferRenderbuffer(
                gl::FRAMEBUFFER,
                gl::DEPTH_STENCIL_ATTACHMENT,
                gl::RENDERBUFFER,
                rbo,
            );

            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);

            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);

            status
        };

        let fb = Self {
            id,
            depth_stencil: rbo,
        };

        if status != gl::FRAMEBUFFER_COMPLETE {
            return Err(FramebufferError::Incomplete(status));
        }

        Ok(fb)
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.id);
        }
    }

    pub fn bind_default() {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        }
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteRenderbuffers(1, (&self.depth_stencil) as *const u32);
            gl::DeleteFramebuffers(1, (&self.id) as *const u32);
        }
    }
}

#[derive(Debug, Error)]
pub enum FramebufferError {
    #[error("Framebuffer incomplete (status {0:#x})")]
    Incomplete(u32),
}
