const RASTER_SHADERS: &[&str] = &["shader.vert", "shader.frag"];

const UI_SHADERS: &[&str] = &["imgui.vert", "imgui.frag"];

const RAYTRACING_SHADERS: &[&str] = &[
    "raytracing/raytrace.rgen",
    "raytracing/raytrace.rmiss",
    "raytracing/raytrace.rchit",
];

const EXTENDED_FLAGS: &[&str] = &["--target-env=vulkan1.2", "-g"];

/// Ordered list of shader sources, relative to `src/`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderManifest {
    entries: Vec<String>,
}

impl ShaderManifest {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Built-in shader sets. `Extended` compiles everything `Base` does plus the
/// UI overlay and the ray tracing stages, with Vulkan 1.2 as the target
/// environment and debug info embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Profile {
    Base,
    Extended,
}

impl Profile {
    pub fn manifest(self) -> ShaderManifest {
        match self {
            Profile::Base => ShaderManifest::new(RASTER_SHADERS.iter().copied()),
            Profile::Extended => ShaderManifest::new(
                RASTER_SHADERS
                    .iter()
                    .chain(UI_SHADERS)
                    .chain(RAYTRACING_SHADERS)
                    .copied(),
            ),
        }
    }

    pub fn flags(self) -> Vec<String> {
        match self {
            Profile::Base => Vec::new(),
            Profile::Extended => EXTENDED_FLAGS.iter().map(|f| f.to_string()).collect(),
        }
    }
}
