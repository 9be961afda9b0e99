use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use renderer::{
    Renderer, SessionConfig, ShaderDocument, FRAGMENT_TYPE_TAG, VERTEX_TYPE_TAG,
};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(args: Cli) -> Result<()> {
    let (width, height) = parse_surface_size(&args.size)?;

    let mut document = ShaderDocument::builtin();
    if let Some(path) = args.vertex_source.as_deref() {
        document.insert(
            args.vertex_shader.clone(),
            VERTEX_TYPE_TAG,
            read_shader_source(path)?,
        );
    }
    if let Some(path) = args.fragment_source.as_deref() {
        document.insert(
            args.fragment_shader.clone(),
            FRAGMENT_TYPE_TAG,
            read_shader_source(path)?,
        );
    }

    tracing::info!(
        width,
        height,
        vertex = %args.vertex_shader,
        fragment = %args.fragment_shader,
        "starting trishade"
    );

    let config = SessionConfig {
        document,
        vertex_shader: args.vertex_shader,
        fragment_shader: args.fragment_shader,
        surface_size: (width, height),
        window_title: args.title,
    };
    Renderer::new(config).run()
}

fn read_shader_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read shader source at {}", path.display()))
}

pub fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 800x600"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("surface dimensions must be greater than zero");
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(parse_surface_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_surface_size(" 1920 X 1080 ").unwrap(), (1920, 1080));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_surface_size("800").is_err());
        assert!(parse_surface_size("800x").is_err());
        assert!(parse_surface_size("x600").is_err());
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("800x0").is_err());
        assert!(parse_surface_size("eight-hundred x six-hundred").is_err());
    }
}
