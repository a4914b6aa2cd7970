pub mod completions;
pub mod generate;
pub mod styles;

use clap::{Parser, Subcommand};

/// avatar - Turn photos into retro pixel-art avatars
#[derive(Parser, Debug)]
#[command(name = "avatar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate pixel-art avatars from photos
    #[command(visible_alias = "gen")]
    Generate(generate::GenerateArgs),

    /// List the available palette styles
    Styles(styles::StylesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "avatar", "generate", "me.jpg", "-o", "out.png", "-p", "16", "-s", "256", "--style",
            "retro",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.inputs, vec![std::path::PathBuf::from("me.jpg")]);
        assert_eq!(args.output, Some(std::path::PathBuf::from("out.png")));
        assert_eq!(args.pixels, Some(16));
        assert_eq!(args.size, Some(256));
        assert_eq!(args.style.as_deref(), Some("retro"));
        assert!(!args.json);
    }

    #[test]
    fn test_parse_generate_defaults_left_to_config() {
        let cli = Cli::try_parse_from(["avatar", "gen", "me.jpg"]).unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.pixels, None);
        assert_eq!(args.size, None);
        assert_eq!(args.style, None);
    }
}
