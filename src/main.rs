extern crate clap;

use clap::{App, Arg};
use crossfill::{render_grid, save_grid, solve, Grid, SolverOptions, Vocabulary};

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("crossfill")
        .about("Fill a crossword structure with words from a word list")
        .arg(
            Arg::with_name("structure")
                .value_name("STRUCTURE")
                .help("Grid structure file, with _ for usable cells")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("Word list, one word per line")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("output")
                .value_name("OUTPUT")
                .help("Where to save the filled grid")
                .index(3),
        )
        .arg(
            Arg::with_name("inference")
                .long("inference")
                .help("Maintain arc consistency after every choice during search"),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("Print search statistics"),
        )
        .get_matches();

    // Both are required, so clap has already rejected the arguments if either is missing.
    let structure = matches.value_of("structure").unwrap_or_default();
    let words = matches.value_of("words").unwrap_or_default();

    let grid = Grid::load(structure).map_err(|e| e.to_string())?;
    let vocabulary = Vocabulary::load(words).map_err(|e| e.to_string())?;
    let options = SolverOptions { inference: matches.is_present("inference") };

    match solve(&grid, &vocabulary, options) {
        Ok(result) => {
            if matches.is_present("stats") {
                println!("{:?}", result.statistics);
            }
            println!("{}", render_grid(&grid, &result.choices));

            if let Some(output) = matches.value_of("output") {
                save_grid(&grid, &result.choices, output)
                    .map_err(|e| format!("Failed to write {}: {}", output, e))?;
            }
        }
        Err(failure) => println!("{}", failure),
    }

    Ok(())
}
