use futures::executor::block_on;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use vux_core::{Annotator, ExportPlan, LookupStrategy, MermaidDocument, Settings};

const WORKSPACE_ENV: &str = "VUX_WORKSPACE_ROOT";
const LOG_ENV: &str = "VUX_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Vux(vux_core::Error),
    Json(serde_json::Error),
    SceneNotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Vux(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::SceneNotFound(name) => write!(f, "No scene found for `{name}`"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<vux_core::Error> for CliError {
    fn from(value: vux_core::Error) -> Self {
        Self::Vux(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Default)]
enum Command {
    #[default]
    Annotate,
    Links,
    Scenes,
    Resolve(String),
    Params,
    ExportPlan,
}

#[derive(Debug, Clone, Copy)]
struct LookupArg(LookupStrategy);

impl FromStr for LookupArg {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" => Ok(Self(LookupStrategy::Walk)),
            "indexed" | "index" => Ok(Self(LookupStrategy::Indexed)),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    workspace: Option<String>,
    settings: Vec<String>,
    lookup: LookupStrategy,
    pretty: bool,
    verbose: bool,
}

fn usage() -> &'static str {
    "vux-cli\n\
\n\
USAGE:\n\
  vux-cli [annotate] [OPTIONS] [<path>|-]\n\
  vux-cli links [<path>|-]\n\
  vux-cli scenes [OPTIONS] [<path>|-]\n\
  vux-cli resolve <name> [OPTIONS]\n\
  vux-cli params [--pretty] [OPTIONS] [<path>|-]\n\
  vux-cli export-plan [--pretty] [OPTIONS] [<path>|-]\n\
\n\
OPTIONS:\n\
  --workspace <dir>        workspace root (default: $VUX_WORKSPACE_ROOT, then the current dir)\n\
  --settings <file.json>   extension settings (flat or nested `vux-editor.*` keys);\n\
                           repeatable, later files are layered over earlier ones\n\
  --lookup walk|indexed    scene lookup strategy (default: indexed)\n\
  --verbose                log at debug level (otherwise $VUX_LOG, default warn)\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - annotate prints the source followed by the generated link and scene styles.\n\
  - resolve exits with status 3 when the node has no scene.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "annotate" => args.command = Command::Annotate,
            "links" => args.command = Command::Links,
            "scenes" => args.command = Command::Scenes,
            "params" => args.command = Command::Params,
            "export-plan" => args.command = Command::ExportPlan,
            "resolve" => {
                let name = next_value(&mut it)?;
                args.command = Command::Resolve(name.clone());
            }
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--workspace" => args.workspace = Some(next_value(&mut it)?.clone()),
            "--settings" => args.settings.push(next_value(&mut it)?.clone()),
            "--lookup" => {
                let LookupArg(strategy) = next_value(&mut it)?
                    .parse::<LookupArg>()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.lookup = strategy;
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Stdin input has no file of its own; it is treated as `./out.mmd`.
fn document_path(input: Option<&str>) -> PathBuf {
    match input {
        Some(path) if path != "-" => PathBuf::from(path),
        _ => PathBuf::from("out.mmd"),
    }
}

fn workspace_root(arg: Option<&str>) -> Result<PathBuf, CliError> {
    if let Some(dir) = arg {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = std::env::var_os(WORKSPACE_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    Ok(std::env::current_dir()?)
}

/// Later files override earlier ones key by key; flat and nested spellings merge.
fn load_settings(paths: &[String]) -> Result<Settings, CliError> {
    let mut settings = Settings::default();
    for path in paths {
        let text = std::fs::read_to_string(Path::new(path))?;
        settings.deep_merge(&Settings::from_json_str(&text)?);
    }
    Ok(settings)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let root = workspace_root(args.workspace.as_deref())?;
    let settings = load_settings(&args.settings)?;
    let annotator = Annotator::from_settings(&root, &settings).with_lookup_strategy(args.lookup);
    tracing::debug!(
        workspace = %root.display(),
        scenes = %annotator.scenes_root().display(),
        "annotator ready"
    );

    if let Command::Resolve(name) = &args.command {
        let Some(path) = annotator.resolve_scene(name) else {
            return Err(CliError::SceneNotFound(name.clone()));
        };
        println!("{}", path.display());
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let doc = MermaidDocument::new(document_path(args.input.as_deref()), &text);

    match args.command {
        Command::Annotate => {
            print!("{}", block_on(annotator.annotate(&doc.code))?);
        }
        Command::Links => {
            print!("{}", vux_core::style_links(&doc.code)?);
        }
        Command::Scenes => {
            println!("{}", annotator.style_scenes(&doc.code));
        }
        Command::Params => {
            let params = annotator.render_params(&doc, &settings)?;
            write_json(&params, args.pretty)?;
        }
        Command::ExportPlan => {
            let plan = ExportPlan::resolve(&settings, Some(root.as_path()), &doc);
            write_json(&plan, args.pretty)?;
        }
        Command::Resolve(_) => {}
    }
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::SceneNotFound(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err @ CliError::Vux(vux_core::Error::PaletteExhausted { .. })) => {
            tracing::error!(%err, "cannot style links");
            eprintln!("{err}");
            std::process::exit(4);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
