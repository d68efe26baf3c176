/// Depth-only framebuffer for the shadow pass.
pub struct DepthFramebuffer {
    id: u32,
}

impl DepthFramebuffer {
    /// Attaches `depth_texture` and disables color output. Fails if the GL
    /// driver reports the attachment combination incomplete.
    pub fn new(depth_texture: u32) -> Result<Self, String> {
        let mut fbo = Self { id: 0 };

        unsafe {
            gl::GenFramebuffers(1, &mut fbo.id);
            gl::BindFramebuffer(gl::FRAMEBUFFER, fbo.id);
            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::DEPTH_ATTACHMENT,
                gl::TEXTURE_2D,
                depth_texture,
                0,
            );
            gl::DrawBuffer(gl::NONE);
            gl::ReadBuffer(gl::NONE);

            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);

            if status != gl::FRAMEBUFFER_COMPLETE {
                return Err(format!("Depth framebuffer incomplete: status {:#x}", status));
            }
        }

        Ok(fbo)
    }

    pub fn bind(&self) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, self.id) };
    }

    pub fn unbind(&self) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, 0) };
    }
}

impl Drop for DepthFramebuffer {
    fn drop(&mut self) {
        if self.id != 0 {
            unsafe {
                gl::DeleteFramebuffers(1, &self.id);
            }
        }
    }
}
