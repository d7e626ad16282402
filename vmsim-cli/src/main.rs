use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{crate_authors, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, Level};

use vmsim::prelude::v1::*;

#[derive(Copy, Clone, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

struct RunArgs {
    trace: PathBuf,
    config: SimConfig,
    mmap: bool,
    format: OutputFormat,
    quiet: bool,
}

fn main() -> Result<()> {
    let matches = parse_args();

    simplelog::TermLogger::init(
        log_level(&matches).to_level_filter(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .unwrap();

    run(extract_args(&matches)?)
}

fn run(args: RunArgs) -> Result<()> {
    let spec = args.config.mmu_spec()?;
    let store_path = args.config.backing_store();

    let store: Box<dyn BackingStore> = if args.mmap {
        Box::new(MappedBackingStore::open(&store_path, spec.page_size)?)
    } else {
        Box::new(FileBackingStore::open(&store_path, spec.page_size)?)
    };
    info!(
        "opened backing store {} ({} bytes)",
        store_path.display(),
        store.size()
    );

    let trace = TraceReader::open(&args.trace, spec.address_space_size)?;
    let mut translator = Translator::new(spec, store)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let stats = translator.replay(trace, |translation| {
        if args.quiet {
            return Ok(());
        }
        match args.format {
            OutputFormat::Text => writeln!(out, "{}", translation).map_err(write_error),
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, translation).map_err(write_error)?;
                writeln!(out).map_err(write_error)
            }
        }
    })?;

    match args.format {
        OutputFormat::Text => writeln!(out, "{}", stats).map_err(write_error)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut out, &stats).map_err(write_error)?;
            writeln!(out).map_err(write_error)?;
        }
    }

    out.flush().map_err(write_error)
}

fn write_error(err: impl std::fmt::Display) -> Error {
    Error(ErrorOrigin::Other, ErrorKind::UnableToWriteFile).log_error(err)
}

fn parse_args() -> ArgMatches {
    Command::new("vmsim")
        .version(crate_version!())
        .author(crate_authors!())
        .about("replays a trace of virtual addresses through a simulated tlb and page table")
        .arg(Arg::new("verbose").short('v').action(ArgAction::Count))
        .arg(
            Arg::new("trace")
                .help("file with one decimal virtual address per line")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("backing-store")
                .long("backing-store")
                .short('b')
                .help("backing store file [default: BACKING_STORE.bin]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("toml run configuration")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("address-space")
                .long("address-space")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("tlb-entries")
                .long("tlb-entries")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("mmap")
                .long("mmap")
                .help("memory map the backing store instead of reading it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("only print the summary")
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}

fn log_level(matches: &ArgMatches) -> Level {
    match matches.get_count("verbose") {
        0 => Level::Error,
        1 => Level::Warn,
        2 => Level::Info,
        3 => Level::Debug,
        4 => Level::Trace,
        _ => Level::Trace,
    }
}

fn extract_args(matches: &ArgMatches) -> Result<RunArgs> {
    let file_config = match matches.get_one::<PathBuf>("config") {
        Some(path) => SimConfig::open(path)?,
        None => SimConfig::default(),
    };

    let config = file_config.merge(SimConfig {
        page_size: matches.get_one::<u64>("page-size").copied(),
        address_space_size: matches.get_one::<u64>("address-space").copied(),
        tlb_entries: matches.get_one::<usize>("tlb-entries").copied(),
        backing_store: matches.get_one::<PathBuf>("backing-store").cloned(),
    });

    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    Ok(RunArgs {
        // required by clap
        trace: matches.get_one::<PathBuf>("trace").unwrap().clone(),
        config,
        mmap: matches.get_flag("mmap"),
        format,
        quiet: matches.get_flag("quiet"),
    })
}
