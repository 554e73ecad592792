//! Line-oriented interactive session: read a title, print similar movies.

use std::io::{BufRead, Write};

use crate::{
    error::{AppError, AppResult},
    services::Recommender,
};

const PROMPT: &str = "\nEnter a movie title (or 'quit' to exit): ";

/// Runs the session until `quit` or end of input
///
/// A failed lookup prints a message and the session carries on; only I/O
/// errors on `input` or `output` end it early.
pub fn run<R: BufRead, W: Write>(
    recommender: &Recommender,
    count: usize,
    mut input: R,
    mut output: W,
) -> AppResult<()> {
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let title = line.trim();
        if title.is_empty() {
            continue;
        }
        if title.eq_ignore_ascii_case("quit") {
            break;
        }

        match recommender.recommend(title, count) {
            Ok(recommendations) => {
                writeln!(output, "Movies similar to '{}':", title)?;
                for (rank, movie) in recommendations.iter().enumerate() {
                    writeln!(output, "{}. {}", rank + 1, movie)?;
                }
            }
            Err(AppError::NotFound(_)) => {
                writeln!(output, "Movie '{}' not found in the dataset.", title)?;
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Recommendation failed");
                writeln!(output, "Unable to recommend movies: {}", e)?;
            }
        }
    }

    Ok(())
}
