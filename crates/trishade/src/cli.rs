use std::path::PathBuf;

use clap::Parser;
use renderer::{BUILTIN_FRAGMENT_ID, BUILTIN_VERTEX_ID};

#[derive(Parser, Debug)]
#[command(
    name = "trishade",
    author,
    version,
    about = "Renders one perspective-projected triangle",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Surface size (e.g. `800x600`).
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "800x600")]
    pub size: String,

    /// Document id of the vertex stage source.
    #[arg(long, value_name = "ID", default_value = BUILTIN_VERTEX_ID)]
    pub vertex_shader: String,

    /// Document id of the fragment stage source.
    #[arg(long, value_name = "ID", default_value = BUILTIN_FRAGMENT_ID)]
    pub fragment_shader: String,

    /// GLSL file replacing the built-in vertex stage source.
    #[arg(long, value_name = "FILE")]
    pub vertex_source: Option<PathBuf>,

    /// GLSL file replacing the built-in fragment stage source.
    #[arg(long, value_name = "FILE")]
    pub fragment_source: Option<PathBuf>,

    /// Window title.
    #[arg(long, value_name = "TITLE", default_value = "Trishade")]
    pub title: String,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_builtin_document() {
        let cli = Cli::parse_from(["trishade"]);
        assert_eq!(cli.size, "800x600");
        assert_eq!(cli.vertex_shader, BUILTIN_VERTEX_ID);
        assert_eq!(cli.fragment_shader, BUILTIN_FRAGMENT_ID);
        assert!(cli.vertex_source.is_none());
    }

    #[test]
    fn shader_ids_are_overridable() {
        let cli = Cli::parse_from([
            "trishade",
            "--vertex-shader",
            "custom-vs",
            "--fragment-shader",
            "custom-fs",
        ]);
        assert_eq!(cli.vertex_shader, "custom-vs");
        assert_eq!(cli.fragment_shader, "custom-fs");
    }
}
