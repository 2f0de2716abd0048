use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "robohash", version)]
struct Cli {
    /// Builder configuration JSON. Defaults register set1 (colored), set2 and set3.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the directory holding the part sets.
    #[arg(long, global = true)]
    sets_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one avatar as a PNG.
    Render(RenderArgs),
    /// Print the parts an input selects without compositing them.
    Pick(PickArgs),
    /// List registered sets.
    Sets,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Identifying text (hashed as UTF-8).
    input: Option<String>,

    /// Use 64 random bits from the OS when no input is given.
    #[arg(long, default_value_t = false)]
    random: bool,

    /// Set name; empty selects the configured default.
    #[arg(long, default_value = "")]
    set: String,

    /// HMAC key for part picking; defaults to the configured seed.
    #[arg(long)]
    seed: Option<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output size as WxH (2-3 digits per side); malformed values fall back to 200x200.
    #[arg(long, default_value = "200x200")]
    size: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PickArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let builder = load_builder(&cli)?;
    match cli.cmd {
        Command::Render(args) => cmd_render(&builder, args),
        Command::Pick(args) => cmd_pick(&builder, args),
        Command::Sets => cmd_sets(&builder),
    }
}

fn load_builder(cli: &Cli) -> anyhow::Result<robohash::RobohashBuilder> {
    let mut cfg = match &cli.config {
        Some(path) => robohash::BuilderConfig::from_path(path)?,
        None => robohash::BuilderConfig::default(),
    };
    if let Some(dir) = &cli.sets_dir {
        cfg = cfg.with_sets_dir(dir);
    }
    let builder = robohash::RobohashBuilder::from_config(&cfg)
        .with_context(|| format!("load part sets from '{}'", cfg.sets_dir.display()))?;
    Ok(builder)
}

fn input_bytes(args: &InputArgs) -> anyhow::Result<Vec<u8>> {
    match (&args.input, args.random) {
        (Some(text), _) => Ok(text.as_bytes().to_vec()),
        (None, true) => {
            let mut buf = [0u8; 8];
            getrandom::fill(&mut buf).map_err(|e| anyhow::anyhow!("draw random input: {e}"))?;
            Ok(buf.to_vec())
        }
        (None, false) => anyhow::bail!("an input is required unless --random is given"),
    }
}

fn cmd_render(builder: &robohash::RobohashBuilder, args: RenderArgs) -> anyhow::Result<()> {
    let input = input_bytes(&args.input)?;
    let seed = args.input.seed.as_deref().map(str::as_bytes);

    let size = robohash::OutputSize::parse(&args.size).unwrap_or_else(|| {
        let size = robohash::OutputSize::default();
        tracing::warn!(requested = %args.size, using = %size, "malformed size");
        size
    });

    let native = builder.build(&input, seed, &args.input.set)?;
    let png = robohash::encode_png(&robohash::resize_to(&native, size))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_pick(builder: &robohash::RobohashBuilder, args: PickArgs) -> anyhow::Result<()> {
    let input = input_bytes(&args.input)?;
    let seed = args.input.seed.as_deref().map(str::as_bytes);
    let set = builder.resolve_set_name(&args.input.set)?;

    let selection = builder.pick(&input, seed, set)?;
    println!("set:         {set}");
    println!("tag:         {}", selection.tag_key());
    println!("fingerprint: {}", selection.fingerprint(set));
    for file in robohash::stacking_order_in(selection.root(), selection.files())? {
        println!("  {}", file.display());
    }
    Ok(())
}

fn cmd_sets(builder: &robohash::RobohashBuilder) -> anyhow::Result<()> {
    for name in builder.set_names() {
        match builder.get(name) {
            Some(robohash::PartSource::Plain(set)) => {
                println!(
                    "{name}: {} groups, {:.1} bits",
                    set.groups().len(),
                    set.entropy_bits()
                );
            }
            Some(robohash::PartSource::Colored(set)) => {
                println!("{name}: {} colors", set.variants().len());
                for variant in set.variants() {
                    println!(
                        "  {}: {} groups, {:.1} bits",
                        variant.name(),
                        variant.groups().len(),
                        variant.entropy_bits()
                    );
                }
            }
            None => {}
        }
    }
    Ok(())
}
