use std::{
    fs,
    path::PathBuf,
};

use clap::{
    Args,
    Parser,
    Subcommand,
};
use minusword::{
    core::{
        exclusion_list::load_terms_from_file,
        load_exclusion_file,
        ReducerSettings,
    },
    generate_exclusion_report,
    render_minus_words,
    EngineSettings,
    PhraseNode,
    ReviewSession,
    ToggleTarget,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Minus-word lists and phrase groups for keyword research", long_about = None)]
struct Cli {
    /// Settings file (defaults to the per-user data directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank the words of a phrase list into minus-word candidates
    Minus(MinusArgs),
    /// Group a phrase list by shared leading words
    Groups(GroupsArgs),
}

#[derive(Args, Debug)]
struct MinusArgs {
    /// Text file with one phrase per line
    phrases: PathBuf,

    /// Exclusion entries, e.g. "(вилладжио|villagio), ремонт*"
    #[arg(short, long)]
    exclude: Option<String>,

    /// Text file with one exclusion entry per line
    #[arg(long)]
    exclude_file: Vec<PathBuf>,

    /// Minimum word length in characters
    #[arg(long)]
    min_length: Option<usize>,

    /// Only lower-case words, no stemming
    #[arg(long)]
    no_stem: bool,

    /// Print frequencies next to the words
    #[arg(long)]
    counts: bool,

    /// Write the list to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GroupsArgs {
    /// Text file with one phrase per line
    phrases: PathBuf,

    /// Group key path to switch off, e.g. "купить дом"
    #[arg(long)]
    exclude_group: Vec<String>,

    /// Print the phrases left after exclusions instead of the tree
    #[arg(long)]
    remaining: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let settings_path = cli.settings.clone().unwrap_or_else(EngineSettings::default_path);
    let settings = EngineSettings::load_or_default(&settings_path);
    log::debug!("Using settings from {}", settings_path.display());

    match cli.command {
        Command::Minus(args) => run_minus(args, settings),
        Command::Groups(args) => run_groups(args),
    }
}

fn run_minus(args: MinusArgs, mut settings: EngineSettings) -> Result<(), Box<dyn std::error::Error>> {
    if args.no_stem {
        settings.reducer = ReducerSettings::Identity;
    }
    if let Some(min_length) = args.min_length {
        settings.min_word_length = min_length;
    }

    let phrases = load_terms_from_file(&args.phrases)?;

    let mut spec = vec![settings.exclusions.to_spec_text()];
    for path in &args.exclude_file {
        spec.push(load_exclusion_file(path)?);
    }
    if let Some(inline) = &args.exclude {
        spec.push(inline.clone());
    }

    let normalizer = settings.build_normalizer();
    let report = generate_exclusion_report(
        &phrases,
        &spec.join("\n"),
        settings.min_word_length,
        &normalizer,
    )?;

    for dropped in &report.dropped {
        log::warn!("Ignored exclusion '{}': {}", dropped.entry, dropped.reason);
    }

    let lines: Vec<String> = if args.counts {
        report
            .entries
            .iter()
            .map(|entry| format!("{}{}\t{}", settings.negation_marker, entry.term, entry.frequency))
            .collect()
    } else {
        render_minus_words(&report.tokens(), &settings.negation_marker)
    };

    match args.output {
        Some(path) => {
            fs::write(&path, lines.join("\n") + "\n")?;
            log::info!("Wrote {} minus-words to {}", lines.len(), path.display());
        }
        None => {
            for line in lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn run_groups(args: GroupsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let phrases = load_terms_from_file(&args.phrases)?;
    let mut session = ReviewSession::new(&phrases)?;

    for path in &args.exclude_group {
        session.toggle(ToggleTarget::Group(path), false)?;
    }

    if args.remaining {
        for phrase in session.query().remaining {
            println!("{}", phrase);
        }
        return Ok(());
    }

    for group in &session.tree().groups {
        print_node(group, &session, 0);
    }

    Ok(())
}

fn print_node(node: &PhraseNode, session: &ReviewSession, depth: usize) {
    let marker = match session.selection().group_status(node) {
        minusword::GroupStatus::Included => "[x]",
        minusword::GroupStatus::Excluded => "[ ]",
        minusword::GroupStatus::Partial => "[-]",
    };
    println!("{}{} {} ({})", "  ".repeat(depth), marker, node.key, node.count);

    for child in &node.children {
        print_node(child, session, depth + 1);
    }
}
