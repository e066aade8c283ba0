//! fairypack - design document to FairyGUI package converter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use fairypack::{DesignNode, ExportOptions, classify, convert_to_file};

#[derive(Parser)]
#[command(name = "fairypack")]
#[command(version, about = "Design document to FairyGUI package converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    fairypack home.json                  Convert to home.fairypackage
    fairypack home.json out.fairypackage Convert to an explicit path
    fairypack --no-pack home.json        Emit an unpacked directory
    fairypack -i home.json               Show design tree summary")]
struct Cli {
    /// Input design tree (JSON, as produced by a design-file decoder)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output package file or directory
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Emit an unpacked directory instead of a zip archive
    #[arg(long)]
    no_pack: bool,

    /// Omit font attributes on text elements
    #[arg(long)]
    ignore_font: bool,

    /// Reuse a build id to keep resource ids stable across conversions
    #[arg(long, value_name = "ID")]
    build_id: Option<String>,

    /// Show a design tree summary without converting
    #[arg(short, long)]
    info: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = if cli.info {
        show_info(&cli.input)
    } else {
        convert(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_tree(path: &str) -> Result<DesignNode, String> {
    let file = std::fs::File::open(path).map_err(|e| format!("{path}: {e}"))?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| format!("{path}: {e}"))
}

fn input_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package".to_string())
}

fn convert(cli: &Cli) -> Result<(), String> {
    let tree = load_tree(&cli.input)?;
    let stem = input_stem(&cli.input);

    let mut options = ExportOptions::NONE;
    if cli.no_pack {
        options = options | ExportOptions::NO_PACK;
    }
    if cli.ignore_font {
        options = options | ExportOptions::IGNORE_FONT;
    }

    let output = match &cli.output {
        Some(path) => PathBuf::from(path),
        None => {
            let parent = Path::new(&cli.input).parent().unwrap_or(Path::new(""));
            if cli.no_pack {
                parent.join(format!("{stem}-fairypackage"))
            } else {
                parent.join(format!("{stem}.fairypackage"))
            }
        }
    };

    let build_id = convert_to_file(&tree, &stem, &output, options, cli.build_id.as_deref())
        .map_err(|e| e.to_string())?;

    if !cli.quiet {
        println!("{} -> {} (build id {build_id})", cli.input, output.display());
    }
    Ok(())
}

fn show_info(path: &str) -> Result<(), String> {
    let tree = load_tree(path)?;

    let mut groups = 0usize;
    let mut texts = 0usize;
    let mut images = 0usize;
    let mut widgets = 0usize;
    let mut visit = |node: &DesignNode| {
        if node.is_group() {
            groups += 1;
            if classify::classify_group(&node.name) != classify::GroupKind::Plain {
                widgets += 1;
            }
        } else if node.text_data().is_some() {
            texts += 1;
        } else if !node.is_empty() {
            images += 1;
        }
    };
    visit(&tree);
    for node in tree.descendants() {
        visit(node);
    }

    println!("File: {path}");
    println!("Root: {} ({}x{})", tree.name, tree.bounds.width, tree.bounds.height);
    println!("Groups: {groups} ({widgets} widgets)");
    println!("Text layers: {texts}");
    println!("Image layers: {images}");

    Ok(())
}
