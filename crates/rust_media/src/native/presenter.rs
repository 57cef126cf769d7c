//! OpenGL blit of a CPU image to the default framebuffer
//!
//! One RGBA texture is attached to a read framebuffer and blitted with the
//! Y axis flipped, since image rows run top-down and GL rows bottom-up.

#![allow(unsafe_code)]

use glow::HasContext;
use image::RgbaImage;

pub(crate) struct Presenter {
    gl: glow::Context,
    texture: glow::Texture,
    framebuffer: glow::Framebuffer,
    size: (u32, u32),
}

impl Presenter {
    /// Load GL entry points from the window's current context
    pub(crate) fn new(window: &mut glfw::PWindow) -> Result<Self, String> {
        // SAFETY: the window's context was made current by the caller and
        // the loader only resolves symbols from it.
        let gl = unsafe {
            glow::Context::from_loader_function(|name| window.get_proc_address(name) as *const _)
        };

        // SAFETY: plain object creation on the current context
        unsafe {
            let texture = gl.create_texture()?;
            let framebuffer = match gl.create_framebuffer() {
                Ok(framebuffer) => framebuffer,
                Err(err) => {
                    gl.delete_texture(texture);
                    return Err(err);
                }
            };
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl,
                texture,
                framebuffer,
                size: (0, 0),
            })
        }
    }

    /// Upload `image` and stretch it over a `width` x `height` framebuffer
    pub(crate) fn present(&mut self, image: &RgbaImage, width: i32, height: i32) {
        let (image_width, image_height) = image.dimensions();
        if image_width == 0 || image_height == 0 {
            return;
        }

        // SAFETY: the owning window's context is current; the pixel slice
        // holds exactly width * height * 4 bytes.
        unsafe {
            let gl = &self.gl;
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            if self.size == (image_width, image_height) {
                gl.tex_sub_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    0,
                    0,
                    image_width as i32,
                    image_height as i32,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(image.as_raw()),
                );
            } else {
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    glow::RGBA8 as i32,
                    image_width as i32,
                    image_height as i32,
                    0,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    Some(image.as_raw()),
                );
                self.size = (image_width, image_height);
            }

            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.framebuffer));
            gl.framebuffer_texture_2d(
                glow::READ_FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(self.texture),
                0,
            );
            gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None);
            gl.viewport(0, 0, width, height);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.blit_framebuffer(
                0,
                0,
                image_width as i32,
                image_height as i32,
                0,
                height,
                width,
                0,
                glow::COLOR_BUFFER_BIT,
                glow::NEAREST,
            );
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    /// Release the GL objects; the owning context must be current
    pub(crate) fn delete(self) {
        // SAFETY: called from NativeWindow::drop after make_current
        unsafe {
            self.gl.delete_framebuffer(self.framebuffer);
            self.gl.delete_texture(self.texture);
        }
    }
}
