use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use gradus_cli::{CommandRewriter, GradusConfig, CONFIG_FILE};
use gradus_evaluator::{load_inventory, parse_inventory_archive, parse_inventory_json, Evaluator};
use gradus_lexicon::{check_coverage, load_stopwords, load_tiers, parse_tiers_archive, parse_tiers_json, CoverageOptions};
use gradus_protocol::{Language, TextAnalysis};
use gradus_rewrite::Controller;
use gradus_tagger::{LexiconTagger, TagLexicon};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::AlignedVec;
use tracing::info;

#[derive(Parser)]
#[command(name = "gradus", author, version, about = "A1 grammar constraints and vocabulary coverage")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Configuration file (defaults to ./gradus.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Artifact {
    Inventory,
    Tiers,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON inventory or tier list into an rkyv archive
    Compile {
        #[arg(value_enum)]
        artifact: Artifact,

        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Evaluate a JSON text analysis against a constraint inventory
    Evaluate {
        #[arg(value_name = "FILE")]
        analysis: PathBuf,

        #[arg(short, long)]
        language: Option<Language>,

        #[arg(long, value_name = "FILE")]
        inventory: Option<PathBuf>,

        /// Skip the clause-level checks
        #[arg(long)]
        no_syntax: bool,
    },
    /// Measure how much of a text each vocabulary tier covers
    Coverage {
        #[arg(value_name = "FILE")]
        text: PathBuf,

        #[arg(short, long)]
        language: Option<Language>,

        #[arg(long, value_name = "FILE")]
        lexicon: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        tiers: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        stopwords: Option<PathBuf>,
    },
    /// Rewrite a text until it reaches a fixpoint, calling an external program
    ///
    /// The program gets `{"text", "constraints"}` as JSON on stdin and must
    /// print the rewrite between the configured delimiters.
    Rewrite {
        #[arg(value_name = "FILE")]
        text: PathBuf,

        /// Instructions passed to the rewrite program
        #[arg(long, value_name = "FILE")]
        constraints: Option<PathBuf>,

        /// Evaluate before each round and stop once the text conforms
        #[arg(long)]
        gated: bool,

        #[arg(short, long)]
        language: Option<Language>,

        #[arg(long, value_name = "FILE")]
        inventory: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        lexicon: Option<PathBuf>,

        /// Rewrite program and its arguments (overrides `rewriter` in the config)
        #[arg(last = true, value_name = "PROGRAM")]
        program: Vec<String>,
    },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("gradus error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = GradusConfig::load_from(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;

    match cli.command {
        Command::Compile {
            artifact,
            input,
            output,
        } => compile(artifact, &input, &output),
        Command::Evaluate {
            analysis,
            language,
            inventory,
            no_syntax,
        } => {
            let language = language.unwrap_or(config.language);
            let inventory = inventory.or(config.inventory);
            evaluate(&analysis, language, inventory.as_deref(), config.check_syntax && !no_syntax)
        }
        Command::Coverage {
            text,
            language,
            lexicon,
            tiers,
            stopwords,
        } => {
            let language = language.unwrap_or(config.language);
            let lexicon = lexicon
                .or(config.lexicon)
                .ok_or_else(|| anyhow!("no tagger lexicon given (--lexicon or `lexicon` in {CONFIG_FILE})"))?;
            let tiers = tiers
                .or(config.tiers)
                .ok_or_else(|| anyhow!("no vocabulary tiers given (--tiers or `tiers` in {CONFIG_FILE})"))?;
            let stopwords = stopwords.or(config.stopwords);
            coverage(&text, language, &lexicon, &tiers, stopwords.as_deref())
        }
        Command::Rewrite {
            text,
            constraints,
            gated,
            language,
            inventory,
            lexicon,
            program,
        } => {
            let mut rewriter = command_rewriter(&config, program)?;
            let constraints = match constraints {
                Some(path) => {
                    fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?
                }
                None => String::new(),
            };
            let gate = if gated {
                let language = language.unwrap_or(config.language);
                let lexicon = lexicon
                    .or_else(|| config.lexicon.clone())
                    .ok_or_else(|| {
                        anyhow!("a gated rewrite needs a tagger lexicon (--lexicon or `lexicon` in {CONFIG_FILE})")
                    })?;
                Some(RewriteGate {
                    language,
                    lexicon,
                    inventory: inventory.or_else(|| config.inventory.clone()),
                    check_syntax: config.check_syntax,
                })
            } else {
                None
            };
            rewrite(&config, &text, &constraints, &mut rewriter, gate)
        }
    }
}

struct RewriteGate {
    language: Language,
    lexicon: PathBuf,
    inventory: Option<PathBuf>,
    check_syntax: bool,
}

fn command_rewriter(config: &GradusConfig, program: Vec<String>) -> anyhow::Result<CommandRewriter> {
    let (program, args) = match program.split_first() {
        Some((program, args)) => (program.clone(), args.to_vec()),
        None => {
            let program = config.rewriter.program.clone().ok_or_else(|| {
                anyhow!("no rewrite program given (`-- PROGRAM ARGS...` or `rewriter.program` in {CONFIG_FILE})")
            })?;
            (program, config.rewriter.args.clone())
        }
    };
    Ok(CommandRewriter::new(program, args).with_timeout(Duration::from_secs(config.rewriter.timeout_secs)))
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GRADUS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn archive<T>(value: &T) -> anyhow::Result<AlignedVec>
where
    T: rkyv::Serialize<AllocSerializer<1024>>,
{
    let mut serializer = AllocSerializer::<1024>::default();
    serializer
        .serialize_value(value)
        .map_err(|error| anyhow!("rkyv serialization failed: {error}"))?;
    Ok(serializer.into_serializer().into_inner())
}

fn compile(artifact: Artifact, input: &Path, output: &Path) -> anyhow::Result<()> {
    let json = fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;

    let bytes = match artifact {
        Artifact::Inventory => {
            let inventory = parse_inventory_json(&json)?;
            info!(language = %inventory.language, level = %inventory.level, "compiling inventory");
            let bytes = archive(&inventory)?;
            // The archive must load back through the same validation path.
            parse_inventory_archive(&bytes)?;
            bytes
        }
        Artifact::Tiers => {
            let tiers = parse_tiers_json(&json)?;
            info!(tiers = tiers.len(), "compiling vocabulary tiers");
            let bytes = archive(&tiers)?;
            parse_tiers_archive(&bytes)?;
            bytes
        }
    };

    fs::write(output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

fn evaluate(
    analysis: &Path,
    language: Language,
    inventory: Option<&Path>,
    check_syntax: bool,
) -> anyhow::Result<()> {
    let json = fs::read_to_string(analysis).with_context(|| format!("failed to read {}", analysis.display()))?;
    let analysis: TextAnalysis = serde_json::from_str(&json).context("malformed text analysis")?;

    let evaluator = match inventory {
        Some(path) => Evaluator::new(Arc::new(load_inventory(path)?)),
        None => Evaluator::for_language(language),
    };

    let report = evaluator.evaluate(&analysis, check_syntax);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn coverage(
    text: &Path,
    language: Language,
    lexicon: &Path,
    tiers: &Path,
    stopwords: Option<&Path>,
) -> anyhow::Result<()> {
    let text = fs::read_to_string(text).with_context(|| format!("failed to read {}", text.display()))?;
    let tagger = LexiconTagger::new(Arc::new(TagLexicon::load(lexicon)?), language);
    let tiers = load_tiers(tiers)?;
    let stopwords = stopwords.map(load_stopwords).transpose()?;

    let report = check_coverage(&text, &tagger, &tiers, stopwords.as_ref(), &CoverageOptions::default())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn rewrite(
    config: &GradusConfig,
    text: &Path,
    constraints: &str,
    rewriter: &mut CommandRewriter,
    gate: Option<RewriteGate>,
) -> anyhow::Result<()> {
    let text = fs::read_to_string(text).with_context(|| format!("failed to read {}", text.display()))?;
    let controller = Controller::new(config.rewrite.clone())?;

    let outcome = match gate {
        Some(gate) => {
            let tagger = LexiconTagger::new(Arc::new(TagLexicon::load(&gate.lexicon)?), gate.language);
            let evaluator = match &gate.inventory {
                Some(path) => Evaluator::new(Arc::new(load_inventory(path)?)),
                None => Evaluator::for_language(gate.language),
            };
            controller.rewrite_gated(&text, constraints, rewriter, &tagger, &evaluator, gate.check_syntax)?
        }
        None => controller.rewrite(&text, constraints, rewriter),
    };

    info!(status = ?outcome.status, iterations = outcome.iterations, "rewrite finished");
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
