use std::ffi::c_void;
use thiserror::Error;

pub struct Texture2D {
    pub(crate) id: u32,
    width: u32,
    height: u32,
}

impl Texture2D {
    pub fn from_pixels(
        width: u32,
        height: u32,
        data: &[u8],
        format: TextureFormats,
        params: &TextureParams,
    ) -> Result<Self, TextureError> {
        check_len(width, height, data.len(), format)?;

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            params.apply(gl::TEXTURE_2D);

            // rows of 1 and 3 channel images are not 4 byte aligned
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.internal_format(),
                width as i32,
                height as i32,
                0,
                format.pixel_format(),
                format.pixel_type(),
                data.as_ptr() as *const c_void,
            );
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);

            if params.min_filter.uses_mipmaps() {
                gl::GenerateMipmap(gl::TEXTURE_2D);
            }

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Ok(Self { id, width, height })
    }

    /// Storage without contents, used as a render target.
    pub fn empty(width: u32, height: u32, format: TextureFormats) -> Self {
        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            TextureParams::render_target().apply(gl::TEXTURE_2D);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.internal_format(),
                width as i32,
                height as i32,
                0,
                format.pixel_format(),
                format.pixel_type(),
                std::ptr::null(),
            );

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Self { id, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

/// Six faces in +X, -X, +Y, -Y, +Z, -Z order.
pub struct Cubemap {
    id: u32,
}

pub struct CubeFace<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
    pub format: TextureFormats,
}

impl Cubemap {
    pub fn from_faces(faces: &[CubeFace<'_>; 6]) -> Result<Self, TextureError> {
        for face in faces {
            check_len(face.width, face.height, face.data.len(), face.format)?;
        }

        // cube completeness needs square faces sharing one size and format
        let first = &faces[0];
        if faces.iter().any(|f| {
            f.width != f.height
                || f.width != first.width
                || f.height != first.height
                || f.format != first.format
        }) {
            return Err(TextureError::MismatchedFaces);
        }

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, id);

            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            for (i, face) in faces.iter().enumerate() {
                gl::TexImage2D(
                    gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32,
                    0,
                    face.format.internal_format(),
                    face.width as i32,
                    face.height as i32,
                    0,
                    face.format.pixel_format(),
                    face.format.pixel_type(),
                    face.data.as_ptr() as *const c_void,
                );
            }
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);

            TextureParams {
                wrap: TextureWrap::ClampToEdge,
                min_filter: TextureFilter::Linear,
                mag_filter: TextureFilter::Linear,
            }
            .apply(gl::TEXTURE_CUBE_MAP);
            gl::TexParameteri(
                gl::TEXTURE_CUBE_MAP,
                gl::TEXTURE_WRAP_R,
                gl::CLAMP_TO_EDGE as i32,
            );

            gl::BindTexture(gl::TEXTURE_CUBE_MAP, 0);
        }

        Ok(Self { id })
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, self.id)
        }
    }
}

impl Drop for Cubemap {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

fn check_len(
    width: u32,
    height: u32,
    len: usize,
    format: TextureFormats,
) -> Result<(), TextureError> {
    if (width as usize * height as usize * format.channels() as usize) != len {
        return Err(TextureError::InvalidSrcLength);
    }

    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("Invalid source data length")]
    InvalidSrcLength,
    #[error("Unsupported channel count {0}")]
    UnsupportedChannels(u8),
    #[error("Cubemap faces must be square and share one size and format")]
    MismatchedFaces,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFormats {
    R8,
    Rgb8,
    Rgba8,
}

impl TextureFormats {
    pub fn from_channels(channels: u8) -> Result<Self, TextureError> {
        match channels {
            1 => Ok(TextureFormats::R8),
            3 => Ok(TextureFormats::Rgb8),
            4 => Ok(TextureFormats::Rgba8),
            c => Err(TextureError::UnsupportedChannels(c)),
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            TextureFormats::R8 => 1,
            TextureFormats::Rgb8 => 3,
            TextureFormats::Rgba8 => 4,
        }
    }

    fn internal_format(&self) -> i32 {
        self.pixel_format() as i32
    }

    fn pixel_format(&self) -> u32 {
        match self {
            TextureFormats::R8 => gl::RED,
            TextureFormats::Rgb8 => gl::RGB,
            TextureFormats::Rgba8 => gl::RGBA,
        }
    }

    fn pixel_type(&self) -> u32 {
        gl::UNSIGNED_BYTE
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    LinearMipmapLinear,
}

impl TextureFilter {
    pub fn uses_mipmaps(&self) -> bool {
        matches!(self, TextureFilter::LinearMipmapLinear)
    }

    fn gl_enum(&self) -> u32 {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
            TextureFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

impl TextureWrap {
    fn gl_enum(&self) -> u32 {
        match self {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureParams {
    pub wrap: TextureWrap,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            wrap: TextureWrap::Repeat,
            min_filter: TextureFilter::LinearMipmapLinear,
            mag_filter: TextureFilter::Linear,
        }
    }
}

impl TextureParams {
    pub fn render_target() -> Self {
        Self {
            wrap: TextureWrap::ClampToEdge,
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::Linear,
        }
    }

    unsafe fn apply(&self, target: u32) {
        gl::TexParameteri(target, gl::TEXTURE_WRAP_S, self.wrap.gl_enum() as i32);
        gl::TexParameteri(target, gl::TEXTURE_WRAP_T, self.wrap.gl_enum() as i32);
        gl::TexParameteri(target, gl::TEXTURE_MIN_FILTER, self.min_filter.gl_enum() as i32);
        gl::TexParameteri(target, gl::TEXTURE_MAG_FILTER, self.mag_filter.gl_enum() as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_channel_count() {
        assert_eq!(TextureFormats::from_channels(1), Ok(TextureFormats::R8));
        assert_eq!(TextureFormats::from_channels(3), Ok(TextureFormats::Rgb8));
        assert_eq!(TextureFormats::from_channels(4), Ok(TextureFormats::Rgba8));
        assert_eq!(
            TextureFormats::from_channels(2),
            Err(TextureError::UnsupportedChannels(2))
        );
    }

    #[test]
    fn source_length_is_checked_first() {
        let res = Texture2D::from_pixels(
            2,
            2,
            &[0; 15],
            TextureFormats::Rgba8,
            &TextureParams::default(),
        );

        assert!(matches!(res, Err(TextureError::InvalidSrcLength)));
    }

    #[test]
    fn cubemap_faces_are_checked_first() {
        fn face(data: &[u8]) -> CubeFace<'_> {
            CubeFace {
                width: 1,
                height: 1,
                data,
                format: TextureFormats::Rgb8,
            }
        }

        let good = [0_u8; 3];
        let bad = [0_u8; 2];

        let res = Cubemap::from_faces(&[
            face(&good),
            face(&good),
            face(&good),
            face(&bad),
            face(&good),
            face(&good),
        ]);

        assert!(matches!(res, Err(TextureError::InvalidSrcLength)));
    }

    #[test]
    fn cubemap_faces_must_match() {
        fn face(width: u32, height: u32, format: TextureFormats, data: &[u8]) -> CubeFace<'_> {
            CubeFace {
                width,
                height,
                data,
                format,
            }
        }

        let small = [0_u8; 3];
        let large = [0_u8; 12];
        let wide = [0_u8; 6];
        let rgba = [0_u8; 4];
        let rgb = TextureFormats::Rgb8;

        let mixed_sizes = Cubemap::from_faces(&[
            face(2, 2, rgb, &large),
            face(2, 2, rgb, &large),
            face(1, 1, rgb, &small),
            face(2, 2, rgb, &large),
            face(2, 2, rgb, &large),
            face(2, 2, rgb, &large),
        ]);
        assert!(matches!(mixed_sizes, Err(TextureError::MismatchedFaces)));

        let not_square = Cubemap::from_faces(&[
            face(2, 1, rgb, &wide),
            face(2, 1, rgb, &wide),
            face(2, 1, rgb, &wide),
            face(2, 1, rgb, &wide),
            face(2, 1, rgb, &wide),
            face(2, 1, rgb, &wide),
        ]);
        assert!(matches!(not_square, Err(TextureError::MismatchedFaces)));

        let mixed_formats = Cubemap::from_faces(&[
            face(1, 1, rgb, &small),
            face(1, 1, TextureFormats::Rgba8, &rgba),
            face(1, 1, rgb, &small),
            face(1, 1, rgb, &small),
            face(1, 1, rgb, &small),
            face(1, 1, rgb, &small),
        ]);
        assert!(matches!(mixed_formats, Err(TextureError::MismatchedFaces)));
    }

    #[test]
    fn only_trilinear_filter_needs_mipmaps() {
        assert!(TextureParams::default().min_filter.uses_mipmaps());
        assert!(!TextureParams::render_target().min_filter.uses_mipmaps());
    }
}
