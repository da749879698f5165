//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing shader objects.
//! [`ShaderProgram::build`] turns a vertex and a fragment source into a linked program.

use std::rc::Rc;

use crate::abs::{Gpu, ProgramId, ShaderId, ShaderStage};
use crate::error::ShaderError;

/// Represents an individual compiled shader stage.
///
/// The stage object is deleted when this is dropped, so a stage that is only needed for linking
/// is released on every path out of [`ShaderProgram::build`].
pub struct Shader<G: Gpu> {
    gpu: Rc<G>,
    id: ShaderId,
    stage: ShaderStage,
}

impl<G: Gpu> Shader<G> {
    /// Compiles a new shader from the given source code.
    pub fn new(gpu: &Rc<G>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let id = gpu.create_shader(stage).map_err(ShaderError::Create)?;
        let shader = Self {
            gpu: Rc::clone(gpu),
            id,
            stage,
        };

        if !gpu.compile_shader(id, source) {
            let log = gpu.shader_info_log(id);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(shader)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<G: Gpu> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gpu.delete_shader(self.id);
    }
}

/// Represents a linked shader program.
///
/// A value of this type only exists if every stage compiled and linking succeeded.
pub struct ShaderProgram<G: Gpu> {
    gpu: Rc<G>,
    id: ProgramId,
}

impl<G: Gpu> ShaderProgram<G> {
    /// Compiles both stages and links them into a program.
    pub fn build(gpu: &Rc<G>, vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let vertex = Shader::new(gpu, ShaderStage::Vertex, vertex_source)?;
        let fragment = Shader::new(gpu, ShaderStage::Fragment, fragment_source)?;
        Self::new(gpu, &[&vertex, &fragment])
    }

    /// Links a new shader program from the given shaders.
    pub fn new(gpu: &Rc<G>, shaders: &[&Shader<G>]) -> Result<Self, ShaderError> {
        let id = gpu.create_program().map_err(ShaderError::Create)?;

        for shader in shaders {
            gpu.attach_shader(id, shader.id);
        }

        let linked = gpu.link_program(id);

        for shader in shaders {
            gpu.detach_shader(id, shader.id);
        }

        if !linked {
            let log = gpu.program_info_log(id);
            gpu.delete_program(id);
            return Err(ShaderError::Link { log });
        }

        Ok(Self {
            gpu: Rc::clone(gpu),
            id,
        })
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gpu.use_program(Some(self.id));
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }
}

impl<G: Gpu> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gpu.delete_program(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::testing::RecordingGpu;
    use crate::render::scene::{FRAGMENT_SHADER, VERTEX_SHADER};

    const BROKEN_SHADER: &str = "#version 330 core\nvoid main() {\n    gl_Position = vec4(;\n";

    #[test]
    fn test_embedded_sources_link() {
        let gpu = Rc::new(RecordingGpu::default());
        let program = ShaderProgram::build(&gpu, VERTEX_SHADER, FRAGMENT_SHADER).unwrap();

        // Only the program survives, both stages are gone.
        assert_eq!(gpu.live_objects(), 1);
        drop(program);
        assert_eq!(gpu.live_objects(), 0);
    }

    #[test]
    fn test_broken_vertex_stage() {
        let gpu = Rc::new(RecordingGpu::default());
        let result = ShaderProgram::build(&gpu, BROKEN_SHADER, FRAGMENT_SHADER);

        match result {
            Err(ShaderError::Compile { stage, log }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            _ => panic!("expected a vertex compile error"),
        }
        assert_eq!(gpu.live_objects(), 0);
    }

    #[test]
    fn test_broken_fragment_stage() {
        let gpu = Rc::new(RecordingGpu::default());
        let result = ShaderProgram::build(&gpu, VERTEX_SHADER, BROKEN_SHADER);

        assert!(matches!(
            result,
            Err(ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            })
        ));
        assert_eq!(gpu.live_objects(), 0);
    }

    #[test]
    fn test_link_failure_releases_everything() {
        let gpu = Rc::new(RecordingGpu::default());
        gpu.fail_link.set(true);
        let result = ShaderProgram::build(&gpu, VERTEX_SHADER, FRAGMENT_SHADER);

        assert!(matches!(result, Err(ShaderError::Link { .. })));
        assert_eq!(gpu.live_objects(), 0);
    }

    #[test]
    fn test_compile_error_message_names_stage() {
        let error = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to compile fragment shader:\n0:3: syntax error"
        );
    }
}
