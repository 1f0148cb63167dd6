use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "camlkit", version)]
struct Cli {
    /// Log filter level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a CAML file and print the document as JSON.
    Inspect(InspectArgs),
    /// Encode a document JSON file as CAML.
    Encode(EncodeArgs),
    /// Decode a CAML file and encode it again.
    Roundtrip(RoundtripArgs),
    /// Report layer tree problems of a CAML or document JSON file.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input CAML file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output CAML path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Encoder options JSON; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long)]
    indent: Option<usize>,

    /// Comment written after the XML declaration.
    #[arg(long)]
    banner: Option<String>,

    /// Skip layer tree validation.
    #[arg(long, default_value_t = false)]
    no_validate: bool,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct RoundtripArgs {
    /// Input CAML file.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input CAML file, or document JSON when the extension is `.json`.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Roundtrip(args) => cmd_roundtrip(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    let Some(out) = out else {
        print!("{text}");
        return Ok(());
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, text).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn encode_options(args: &OutputArgs) -> anyhow::Result<camlkit::EncodeOptions> {
    let mut opts = match &args.options {
        Some(path) => serde_json::from_str(&read_text(path)?)
            .with_context(|| format!("parse encoder options '{}'", path.display()))?,
        None => camlkit::EncodeOptions::default(),
    };
    if let Some(indent) = args.indent {
        opts.indent = indent;
    }
    if let Some(banner) = &args.banner {
        opts.banner = Some(banner.clone());
    }
    if args.no_validate {
        opts.validate = false;
    }
    Ok(opts)
}

fn load_caml(path: &Path) -> anyhow::Result<camlkit::CamlDocument> {
    let text = read_text(path)?;
    camlkit::try_decode(&text).with_context(|| format!("decode CAML '{}'", path.display()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc = load_caml(&args.in_path)?;
    let mut json = doc.to_json_pretty()?;
    json.push('\n');
    write_output(args.out.as_deref(), &json)
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let doc = camlkit::CamlDocument::from_json_path(&args.in_path)?;
    let opts = encode_options(&args.output)?;
    let xml = camlkit::encode_with(&doc, &opts)?;
    write_output(args.output.out.as_deref(), &xml)
}

fn cmd_roundtrip(args: RoundtripArgs) -> anyhow::Result<()> {
    let doc = load_caml(&args.in_path)?;
    let opts = encode_options(&args.output)?;
    let xml = camlkit::encode_with(&doc, &opts)?;
    write_output(args.output.out.as_deref(), &xml)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let is_json = args
        .in_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let doc = if is_json {
        camlkit::CamlDocument::from_json_path(&args.in_path)?
    } else {
        load_caml(&args.in_path)?
    };

    match camlkit::validate_layer_tree(&doc.root) {
        Ok(()) => {
            eprintln!("ok: {}", args.in_path.display());
            Ok(())
        }
        Err(errors) => {
            for err in &errors.errors {
                eprintln!("{err}");
            }
            anyhow::bail!("{} problem(s) in '{}'", errors.errors.len(), args.in_path.display())
        }
    }
}
