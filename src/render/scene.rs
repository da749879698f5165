//! The hard-coded scenes and the shaders they are drawn with.

use std::{fmt, rc::Rc, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::abs::{Geometry, Gpu, ShaderProgram, upload};
use crate::error::{Error, Result};
use crate::render::frame::{DrawMode, render_frame};

pub const VERTEX_SHADER: &str = include_str!("shaders/basic/vert.glsl");
pub const FRAGMENT_SHADER: &str = include_str!("shaders/basic/frag.glsl");

#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

#[rustfmt::skip]
pub const RECTANGLE_VERTICES: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

#[rustfmt::skip]
pub const RECTANGLE_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

/// Which of the tutorial programs to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// Only clears the window.
    Blank,
    /// One triangle, drawn without indices.
    #[default]
    Triangle,
    /// Two triangles sharing four vertices, drawn with indices.
    Rectangle,
}

impl Scene {
    /// Vertex positions and optional indices of the scene, `None` if nothing is drawn.
    pub fn geometry(self) -> Option<(&'static [f32], Option<&'static [u32]>)> {
        match self {
            Scene::Blank => None,
            Scene::Triangle => Some((&TRIANGLE_VERTICES[..], None)),
            Scene::Rectangle => Some((&RECTANGLE_VERTICES[..], Some(&RECTANGLE_INDICES[..]))),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Blank => write!(f, "blank"),
            Scene::Triangle => write!(f, "triangle"),
            Scene::Rectangle => write!(f, "rectangle"),
        }
    }
}

impl FromStr for Scene {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blank" => Ok(Scene::Blank),
            "triangle" => Ok(Scene::Triangle),
            "rectangle" => Ok(Scene::Rectangle),
            _ => Err(Error::Config(format!(
                "Unknown scene \"{s}\", expected blank, triangle or rectangle"
            ))),
        }
    }
}

/// A geometry and the program it is drawn with.
///
/// The program is declared first so it is released before the buffers.
pub struct Pipeline<G: Gpu> {
    pub program: ShaderProgram<G>,
    pub geometry: Geometry<G>,
}

impl<G: Gpu> Pipeline<G> {
    /// Uploads the scene's geometry and builds the shader program for it.
    pub fn for_scene(gpu: &Rc<G>, scene: Scene) -> Result<Option<Self>> {
        let Some((vertices, indices)) = scene.geometry() else {
            return Ok(None);
        };

        let geometry = upload(gpu, vertices, indices)?;
        let program = ShaderProgram::build(gpu, VERTEX_SHADER, FRAGMENT_SHADER)?;
        Ok(Some(Self { program, geometry }))
    }

    /// Element count and draw mode used for this geometry.
    pub fn draw_call(&self) -> (i32, DrawMode) {
        match &self.geometry.index_buffer {
            Some(indices) => (indices.len() as i32, DrawMode::Indexed),
            None => (
                self.geometry.vertex_buffer.vertex_count() as i32,
                DrawMode::Arrays,
            ),
        }
    }

    pub fn draw(&self, gpu: &G) {
        let (count, mode) = self.draw_call();
        render_frame(gpu, &self.geometry.vertex_array, &self.program, count, mode);
    }
}
