//! Host-side shader source document.
//!
//! Shader text reaches the renderer the same way it would reach a hosted
//! demo page: entries are looked up by id and carry a type tag naming the
//! stage they belong to. Resolution is explicit; a missing entry or an
//! unknown tag is a typed error, never a silently unusable stage.

use std::collections::HashMap;

use wgpu::naga::ShaderStage;

/// Type tag marking an entry as vertex-stage source.
pub const VERTEX_TYPE_TAG: &str = "x-shader/x-vertex";
/// Type tag marking an entry as fragment-stage source.
pub const FRAGMENT_TYPE_TAG: &str = "x-shader/x-fragment";

/// Document id of the built-in vertex stage.
pub const BUILTIN_VERTEX_ID: &str = "shader-vs";
/// Document id of the built-in fragment stage.
pub const BUILTIN_FRAGMENT_ID: &str = "shader-fs";

/// Errors raised while assembling the shader program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("shader source '{0}' not found in the document")]
    Missing(String),
    #[error("shader source '{id}' has unrecognized type tag '{type_tag}'")]
    UnrecognizedKind { id: String, type_tag: String },
    #[error("shader source '{id}' is a {found} stage, expected {expected}")]
    StageMismatch {
        id: String,
        expected: ShaderKind,
        found: ShaderKind,
    },
    #[error("{kind} shader '{id}' failed to compile:\n{log}")]
    Compile {
        id: String,
        kind: ShaderKind,
        log: String,
    },
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },
}

/// The two shader stages a program links together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    /// Maps a document type tag to a stage. Unknown tags yield `None`; the
    /// caller reports them without ever requesting a GPU shader object.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            VERTEX_TYPE_TAG => Some(ShaderKind::Vertex),
            FRAGMENT_TYPE_TAG => Some(ShaderKind::Fragment),
            _ => None,
        }
    }

    pub(crate) fn naga_stage(self) -> ShaderStage {
        match self {
            ShaderKind::Vertex => ShaderStage::Vertex,
            ShaderKind::Fragment => ShaderStage::Fragment,
        }
    }
}

impl std::fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// One document entry: the stage type tag plus the GLSL text.
#[derive(Clone, Debug)]
pub struct ShaderEntry {
    pub type_tag: String,
    pub text: String,
}

/// A shader stage resolved from the document, ready for compilation.
#[derive(Clone, Debug)]
pub struct ResolvedShader {
    pub id: String,
    pub kind: ShaderKind,
    pub source: String,
}

/// Maps entry ids to tagged shader sources.
#[derive(Clone, Debug, Default)]
pub struct ShaderDocument {
    entries: HashMap<String, ShaderEntry>,
}

impl ShaderDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding the built-in vertex/fragment pair under
    /// [`BUILTIN_VERTEX_ID`] and [`BUILTIN_FRAGMENT_ID`].
    pub fn builtin() -> Self {
        let mut document = Self::new();
        document.insert(BUILTIN_VERTEX_ID, VERTEX_TYPE_TAG, VERTEX_SHADER_GLSL);
        document.insert(BUILTIN_FRAGMENT_ID, FRAGMENT_TYPE_TAG, FRAGMENT_SHADER_GLSL);
        document
    }

    /// Inserts or replaces an entry.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        type_tag: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries.insert(
            id.into(),
            ShaderEntry {
                type_tag: type_tag.into(),
                text: text.into(),
            },
        );
    }

    /// Looks up an entry by id.
    pub fn element(&self, id: &str) -> Option<&ShaderEntry> {
        self.entries.get(id)
    }

    /// Resolves an entry into a compilable stage.
    ///
    /// Fails with [`ShaderError::Missing`] when the id is absent and with
    /// [`ShaderError::UnrecognizedKind`] when the type tag names neither
    /// stage.
    pub fn resolve(&self, id: &str) -> Result<ResolvedShader, ShaderError> {
        let entry = self
            .element(id)
            .ok_or_else(|| ShaderError::Missing(id.to_string()))?;
        let kind = ShaderKind::from_type_tag(&entry.type_tag).ok_or_else(|| {
            ShaderError::UnrecognizedKind {
                id: id.to_string(),
                type_tag: entry.type_tag.clone(),
            }
        })?;
        Ok(ResolvedShader {
            id: id.to_string(),
            kind,
            source: entry.text.clone(),
        })
    }
}

/// Built-in vertex stage: transforms each position by the model-view and
/// perspective matrices. The binding slots must match
/// [`crate::gpu::pipeline`]'s layout.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec3 vertexPosition;

layout(set = 0, binding = 0) uniform Perspective {
    mat4 perspectiveMatrix;
};
layout(set = 0, binding = 1) uniform ModelView {
    mat4 modelViewMatrix;
};

void main() {
    gl_Position = perspectiveMatrix * modelViewMatrix * vec4(vertexPosition, 1.0);
}
";

/// Built-in fragment stage: flat white.
const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) out vec4 outColor;

void main() {
    outColor = vec4(1.0, 1.0, 1.0, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_document_resolves_both_stages() {
        let document = ShaderDocument::builtin();

        let vertex = document.resolve(BUILTIN_VERTEX_ID).unwrap();
        assert_eq!(vertex.kind, ShaderKind::Vertex);
        assert!(vertex.source.contains("gl_Position"));

        let fragment = document.resolve(BUILTIN_FRAGMENT_ID).unwrap();
        assert_eq!(fragment.kind, ShaderKind::Fragment);
        assert!(fragment.source.contains("outColor"));
    }

    #[test]
    fn kind_dispatch_follows_type_tag() {
        let mut document = ShaderDocument::new();
        document.insert("frag", FRAGMENT_TYPE_TAG, "void main() {}");
        document.insert("vert", VERTEX_TYPE_TAG, "void main() {}");

        assert_eq!(
            document.resolve("frag").unwrap().kind,
            ShaderKind::Fragment
        );
        assert_eq!(document.resolve("vert").unwrap().kind, ShaderKind::Vertex);
    }

    #[test]
    fn missing_id_is_reported() {
        let document = ShaderDocument::builtin();
        let err = document.resolve("no-such-shader").unwrap_err();
        assert!(matches!(err, ShaderError::Missing(id) if id == "no-such-shader"));
    }

    #[test]
    fn unknown_type_tag_is_rejected_without_a_stage() {
        let mut document = ShaderDocument::new();
        document.insert("weird", "x-shader/x-geometry", "void main() {}");

        let err = document.resolve("weird").unwrap_err();
        match err {
            ShaderError::UnrecognizedKind { id, type_tag } => {
                assert_eq!(id, "weird");
                assert_eq!(type_tag, "x-shader/x-geometry");
            }
            other => panic!("expected UnrecognizedKind, got {other:?}"),
        }
        assert!(ShaderKind::from_type_tag("x-shader/x-geometry").is_none());
    }
}
