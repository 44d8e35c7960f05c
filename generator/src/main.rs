use std::num::NonZero;
use std::process::ExitCode;

use clap::Parser;
use zipline::builder::{Builder, SquareDomainBuilder};
use zipline::minimizer::ScanOrder;
use zipline::{Location, PuzzleConfig, PuzzleGenerator};

#[derive(Parser)]
#[command(name = "zipline-gen")]
#[command(about = "Generate a numbered-path puzzle and print it with its solution")]
struct Cli {
    #[arg(long, default_value_t = NonZero::new(6).unwrap())]
    width: NonZero<usize>,

    #[arg(long, default_value_t = NonZero::new(6).unwrap())]
    height: NonZero<usize>,

    /// Seed for a reproducible puzzle
    #[arg(long)]
    seed: Option<u64>,

    /// Try clues for removal in random order instead of back to front
    #[arg(long)]
    shuffle: bool,

    /// Cells to leave out of the board, as `x,y`
    #[arg(long = "hole", value_parser = parse_location)]
    holes: Vec<Location>,
}

fn parse_location(arg: &str) -> Result<Location, String> {
    let (x, y) = arg.split_once(',').ok_or_else(|| format!("expected x,y but got {arg}"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x coordinate in {arg}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y coordinate in {arg}"))?;
    Ok(Location(x, y))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder = SquareDomainBuilder::with_dims((cli.width, cli.height));
    for hole in cli.holes {
        builder.drop_location(hole);
    }

    let mut config = PuzzleConfig::default();
    if cli.shuffle {
        config.minimizer.scan_order = ScanOrder::Shuffled;
    }

    let mut generator = match PuzzleGenerator::from_builder(&builder, config, cli.seed) {
        Ok(generator) => generator,
        Err(failure) => {
            eprintln!("{failure}");
            return ExitCode::FAILURE;
        }
    };

    let puzzle = match generator.generate() {
        Ok(puzzle) => puzzle,
        Err(failure) => {
            eprintln!("{failure}");
            return ExitCode::FAILURE;
        }
    };

    println!("{} clues, starting at {:?}", puzzle.clue_count(), puzzle.start());
    println!("{puzzle}");
    println!("solution:");
    println!("{}", puzzle.solution().to_grid(generator.domain()));

    ExitCode::SUCCESS
}
