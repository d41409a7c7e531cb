use std::fmt::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vigenere_analysis::estimate::{self, coincidence, kasiski};
use vigenere_analysis::{
    Agreement, AnalysisConfig, Direction, IcScanParams, KasiskiParams, LengthEstimate,
    LengthSurvey, Recovery, Scoring, Text, apply_to_text, recover_keyword, utils,
};

/// Command-line arguments for the Vigenère decryptor program.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input file containing encrypted text
    #[arg(short, long, help = "Path to the input file containing encrypted text")]
    file: String,

    /// Path to the output file where decrypted text will be saved
    #[arg(
        short,
        long,
        help = "Path to the output file for decrypted text (stdout if omitted)"
    )]
    output: Option<String>,

    /// Keyword length estimator
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = Method::Both,
        help = "Length estimator to use"
    )]
    method: Method,

    /// N-gram size for the Kasiski examination
    #[arg(
        short = 's',
        long,
        default_value_t = 3,
        help = "N-gram size for the Kasiski examination"
    )]
    ngram_size: usize,

    /// Number of most frequent repeat distances to factor
    #[arg(long, default_value_t = 5, help = "Number of top repeat distances to factor")]
    top_distances: usize,

    /// Smallest factor accepted as a keyword length by Kasiski
    #[arg(long, default_value_t = 4, help = "Smallest factor accepted as a keyword length")]
    min_factor: usize,

    /// Largest keyword length tried by the IC scan
    #[arg(
        short = 'x',
        long,
        default_value_t = 10,
        help = "Largest keyword length tried by the IC scan"
    )]
    max_length: usize,

    /// Expected scaled index of coincidence of the plaintext language
    #[arg(long, default_value_t = 1.73, help = "Reference index of coincidence (scaled by 26)")]
    reference_ic: f64,

    /// Skip estimation and use this keyword length
    #[arg(short = 'k', long, help = "Force the keyword length")]
    key_length: Option<usize>,

    /// Column scoring function
    #[arg(
        short = 'c',
        long,
        value_enum,
        default_value_t = ScoringArg::IcTarget,
        help = "Column scoring function"
    )]
    scoring: ScoringArg,

    /// Target dot product for ic-target scoring
    #[arg(long, default_value_t = 0.065, help = "Target score for ic-target scoring")]
    target: f64,

    /// Print per-column shift scores
    #[arg(short, long, help = "Show per-column details")]
    details: bool,
}

/// Which estimator decides the keyword length
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Kasiski examination only
    Kasiski,
    /// Index-of-coincidence scan only
    IcScan,
    /// Run both (plus Friedman) and report disagreement
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScoringArg {
    /// Dot product against English, closest to the target wins
    IcTarget,
    /// Pearson correlation against English, highest wins
    Pearson,
}

impl Cli {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            kasiski: KasiskiParams {
                ngram_size: self.ngram_size,
                top_distances: self.top_distances,
                min_factor: self.min_factor,
                ..KasiskiParams::default()
            },
            ic_scan: IcScanParams {
                max_length: self.max_length,
                reference_ic: self.reference_ic,
            },
            scoring: match self.scoring {
                ScoringArg::IcTarget => Scoring::IcTarget { target: self.target },
                ScoringArg::Pearson => Scoring::Pearson,
            },
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli: Cli = Cli::parse();
    let input: String = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read input file {}", cli.file))?;

    // Clean text: only alphabetic characters, uppercase
    let text = Text::normalize(&input);
    if text.is_empty() {
        bail!("Input file {} contains no letters", cli.file);
    }
    if text.len() < 50 {
        warn!(len = text.len(), "Text may be too short for reliable analysis");
    }

    println!("{}", utils::headline("cipher"));
    println!("{}", utils::wrap(&text.to_string()));
    println!(" -> length: {}", text.len());

    let config = cli.config();
    config.validate()?;

    // Step 1: Find key length
    let key_length = match cli.key_length {
        Some(length) => {
            info!(length, "Using forced keyword length");
            length
        }
        None => find_key_length(&text, &config, cli.method)?,
    };

    // Step 2: Reconstruct the key using frequency analysis
    let recovery = recover_keyword(&text, key_length, config.scoring)?;
    let mut report = String::new();
    render_recovery(&mut report, &recovery, cli.details)?;
    print!("{}", report);

    // Step 3: Decrypt the original text
    let decrypted = apply_to_text(&input, &recovery.keyword, Direction::Decrypt);

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &decrypted)
                .with_context(|| format!("Failed to write output file {}", path))?;
            info!("Decrypted text saved to: {}", path);
        }
        None => {
            println!("{}", utils::headline("deciphered"));
            println!("{}", decrypted);
        }
    }

    Ok(())
}

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

/// Runs the selected estimator(s) and commits to one length.
fn find_key_length(text: &Text, config: &AnalysisConfig, method: Method) -> Result<usize> {
    match method {
        Method::Kasiski => {
            let report = kasiski::examine(text, &config.kasiski)?;
            println!("{}", utils::headline("kasiski"));
            println!(" -> {}", report.estimate);
            match report.estimate {
                LengthEstimate::Determined { length, .. } => Ok(length),
                LengthEstimate::Indeterminate(reason) => bail!(
                    "Kasiski examination is inconclusive ({}); \
                     try --method ic-scan or more ciphertext",
                    reason
                ),
            }
        }
        Method::IcScan => {
            let report = coincidence::scan(text, &config.ic_scan)?;
            println!("{}", utils::headline("index of coincidence"));
            println!(" -> {}", report.estimate);
            Ok(report.estimate.length().unwrap_or(1))
        }
        Method::Both => {
            let survey = estimate::survey(text, config)?;
            let mut report = String::new();
            render_survey(&mut report, &survey)?;
            print!("{}", report);
            Ok(survey.preferred_length())
        }
    }
}

/// Formats every length signal of a survey.
fn render_survey(out: &mut impl Write, survey: &LengthSurvey) -> fmt::Result {
    writeln!(out, "{}", utils::headline("kasiski"))?;
    for (distance, count) in survey.kasiski.distances.iter().take(5) {
        writeln!(out, "  distance {:4} seen {} times", distance, count)?;
    }
    for (factor, tally) in survey.kasiski.factors.iter().take(5) {
        writeln!(out, "  factor {:3} tally {}", factor, tally)?;
    }
    writeln!(out, " -> {}", survey.kasiski.estimate)?;

    writeln!(out, "{}", utils::headline("index of coincidence"))?;
    for row in &survey.ic_scan.rows {
        writeln!(out, "  length {:3}  IC {:.3}", row.length, row.average_ic)?;
    }
    writeln!(out, " -> {}", survey.ic_scan.estimate)?;

    match survey.friedman {
        Some(friedman) => {
            let length = friedman
                .length
                .map_or_else(|| "n/a".to_string(), |l| format!("{:.2}", l));
            writeln!(out, " -> friedman: IC {:.4}, length ~ {}", friedman.ic, length)?;
        }
        None => writeln!(out, " -> friedman: n/a")?,
    }

    match survey.agreement() {
        Agreement::Agree(length) => writeln!(out, " -> estimators agree on {}", length),
        Agreement::Disagree { kasiski, ic_scan } => writeln!(
            out,
            " -> estimators disagree: kasiski {}, ic scan {}; using {}",
            kasiski,
            ic_scan,
            survey.preferred_length()
        ),
        Agreement::IcScanOnly(length) => {
            writeln!(out, " -> kasiski inconclusive; using ic scan length {}", length)
        }
    }
}

/// Formats the recovered keyword, its confidence and optionally the column scores.
fn render_recovery(out: &mut impl Write, recovery: &Recovery, details: bool) -> fmt::Result {
    writeln!(out, "{}", utils::headline(&format!("keyword ({})", recovery.language)))?;
    for column in &recovery.columns {
        write!(
            out,
            "  column {:2} ({} symbols): '{}' {:.3}, next '{}' {:.3}",
            column.column + 1,
            column.len,
            column.key,
            column.best_score(),
            column.runner_up,
            column.runner_up_score()
        )?;
        if details {
            let scores: Vec<String> = column.scores.iter().map(|s| format!("{:.3}", s)).collect();
            write!(out, "\n    {}", scores.join(" "))?;
        }
        writeln!(out)?;
    }
    writeln!(out, " -> keyword: \"{}\"", recovery.keyword)?;
    writeln!(out, " -> confidence: {}", recovery.confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STINSON: &str = "\
        KCCPKBGUFDPHQTYAVINRRTMVGRKDNBVFDETDGILTXRGUDDKOTFMBPVGEGLTGCKQRACQCWDNAWCRXIZAK\
        FTLEWRPTYCQKYVXCHKFTPONCQQRHJVAJUWETMCMSPKQDYHJVDAHCTRLSVSKCGCZQQDZXGSFRLSWCWSJT\
        BHAFSIASPRJAHKJRJUMVGKMITZHFPDISPZLVLGWTFPLKKEBDPGCEBSHCTJRWXBAFSPEZQNRWXCVYCGAO\
        NWDDKACKAWBBIKFTIOVKCGGHJVLNHIFFSQESVYCLACNVRWBBIREPBBVFEXOSCDYGZWPFDTKFQIYCWHJV\
        LNHIQIBTKHJVNPIST";

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["vigenere_decrypter", "-f", "cipher.txt"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_config() {
        let cli = cli(&[]);
        assert_eq!(cli.method, Method::Both);
        assert_eq!(cli.config(), AnalysisConfig::default());
    }

    #[test]
    fn test_config_from_flags() {
        let cli = cli(&["-s", "4", "-x", "20", "-c", "pearson", "-m", "ic-scan"]);
        let config = cli.config();
        assert_eq!(config.kasiski.ngram_size, 4);
        assert_eq!(config.ic_scan.max_length, 20);
        assert_eq!(config.scoring, Scoring::Pearson);
        assert_eq!(cli.method, Method::IcScan);
    }

    #[test]
    fn test_find_key_length() {
        let text = Text::normalize(STINSON);
        let config = AnalysisConfig::default();
        for method in [Method::Kasiski, Method::IcScan, Method::Both] {
            assert_eq!(find_key_length(&text, &config, method).unwrap(), 6);
        }
    }

    #[test]
    fn test_kasiski_inconclusive_is_an_error() {
        let text = Text::normalize("ABCDEFGHIJKLMNOP");
        let result = find_key_length(&text, &AnalysisConfig::default(), Method::Kasiski);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_recovery() {
        let text = Text::normalize(STINSON);
        let recovery = recover_keyword(&text, 6, Scoring::Pearson).unwrap();
        let mut rendered = String::new();
        render_recovery(&mut rendered, &recovery, false).unwrap();
        assert!(rendered.starts_with("===( keyword (English) )"));
        assert!(rendered.contains("keyword: \"CRYPTO\""));
        assert!(rendered.contains("confidence: high"));
        assert_eq!(rendered.lines().count(), 1 + 6 + 2);

        let mut detailed = String::new();
        render_recovery(&mut detailed, &recovery, true).unwrap();
        assert_eq!(detailed.lines().count(), 1 + 12 + 2);
    }

    #[test]
    fn test_render_survey() {
        let text = Text::normalize(STINSON);
        let survey = estimate::survey(&text, &AnalysisConfig::default()).unwrap();
        let mut rendered = String::new();
        render_survey(&mut rendered, &survey).unwrap();
        assert!(rendered.contains("estimators agree on 6"));
        assert!(rendered.contains("friedman: IC 0.0409"));
    }
}
