use clap::Parser;
use miette::Result;
use retro_avatar::cli::{Cli, Commands};
use retro_avatar::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => {
            retro_avatar::cli::generate::run(args, &printer)?;
        }
        Commands::Styles(args) => retro_avatar::cli::styles::run(args, &printer)?,
        Commands::Completions(args) => retro_avatar::cli::completions::run(args)?,
    }

    Ok(())
}
