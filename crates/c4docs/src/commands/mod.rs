//! CLI command implementations.

mod build;
mod projects;
mod render;

pub(crate) use build::BuildArgs;
pub(crate) use projects::ProjectsArgs;
pub(crate) use render::RenderArgs;

use c4docs_build::SessionOptions;
use c4docs_config::LikeC4Config;

/// Build session options from the `[likec4]` config section.
fn session_options(likec4: &LikeC4Config) -> SessionOptions {
    SessionOptions {
        use_dot: likec4.use_dot,
        assets_dir: likec4.assets_dir.clone(),
        manifest: likec4.manifest.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_session_options_defaults_match() {
        assert_eq!(session_options(&LikeC4Config::default()), SessionOptions::default());
    }

    #[test]
    fn test_session_options_from_config() {
        let likec4 = LikeC4Config {
            use_dot: false,
            assets_dir: "static/c4".to_owned(),
            manifest: "likec4.json".to_owned(),
            ..LikeC4Config::default()
        };

        let options = session_options(&likec4);

        assert!(!options.use_dot);
        assert_eq!(options.assets_dir, "static/c4");
        assert_eq!(options.manifest, "likec4.json");
    }
}
