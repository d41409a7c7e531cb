use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vigenere_analysis::{apply_to_text, transform, utils, Direction, Keyword, Text};

/// Command-line arguments for the Vigenère cipher program.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input file containing text to encrypt/decrypt
    #[arg(short, long, help = "Path to the input file")]
    file: String,

    /// Key string for the Vigenère cipher (letters only)
    #[arg(short, long, help = "Key string for the cipher")]
    key: Keyword,

    /// Path to the output file where result will be saved
    #[arg(short, long, help = "Path to the output file (stdout if omitted)")]
    output: Option<String>,

    /// Mode of operation (encrypt or decrypt)
    #[arg(short, long, help = "Mode of operation (encrypt/decrypt)")]
    mode: OperationMode,

    /// Drop everything but letters and print the result in 5-letter blocks
    #[arg(short, long, help = "Normalize to letters only and group output in blocks")]
    letters_only: bool,
}

/// Enum representing the mode of operation for the cipher.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperationMode {
    /// Encrypt mode
    Encrypt,
    /// Decrypt mode
    Decrypt,
}

impl From<OperationMode> for Direction {
    fn from(mode: OperationMode) -> Self {
        match mode {
            OperationMode::Encrypt => Direction::Encrypt,
            OperationMode::Decrypt => Direction::Decrypt,
        }
    }
}

/// Main entry point for the Vigenère cipher program.
fn main() -> Result<()> {
    init_tracing();

    // Parse command-line arguments
    let cli: Cli = Cli::parse();

    // Read input file content
    let content: String = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read input file {}", cli.file))?;

    info!(mode = ?cli.mode, key = %cli.key, "Processing {}", cli.file);
    let result = run(&content, &cli.key, cli.mode.into(), cli.letters_only);

    // Write result to output file, or stdout
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &result)
                .with_context(|| format!("Failed to write output file {}", path))?;
            info!("Operation completed successfully! Output saved to: {}", path);
        }
        None => println!("{}", result),
    }

    Ok(())
}

/// Log to stderr so results on stdout stay clean; `RUST_LOG` overrides the level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Transforms the content with the keyword.
///
/// # Arguments
///
/// * `content` - The input text.
/// * `key` - The validated keyword.
/// * `direction` - Encrypt or decrypt.
/// * `letters_only` - Normalize first and group the result in 5-letter blocks.
///
/// # Returns
///
/// A `String` containing the transformed text.
fn run(content: &str, key: &Keyword, direction: Direction, letters_only: bool) -> String {
    if letters_only {
        let text = transform(&Text::normalize(content), key, direction);
        utils::wrap(&text.to_string())
    } else {
        apply_to_text(content, key, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_key() {
        let cli = Cli::try_parse_from(["vigenere", "-f", "in.txt", "-k", "Lemon", "-m", "encrypt"])
            .unwrap();
        assert_eq!(cli.key.to_string(), "LEMON");
        assert!(cli.output.is_none());
        assert!(!cli.letters_only);
    }

    #[test]
    fn test_cli_rejects_bad_key() {
        let result =
            Cli::try_parse_from(["vigenere", "-f", "in.txt", "-k", "Moby Dick", "-m", "decrypt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_preserves_layout() {
        let key = Keyword::new("KEY").unwrap();
        assert_eq!(run("Hello, World!", &key, Direction::Encrypt, false), "Rijvs, Uyvjn!");
        assert_eq!(run("RIJVS", &key, Direction::Decrypt, false), "HELLO");
    }

    #[test]
    fn test_run_letters_only() {
        let key = Keyword::new("MATH").unwrap();
        assert_eq!(run("Make it happen.", &key, Direction::Encrypt, true), "YADLU TAHBP XU");
    }
}
