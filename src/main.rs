//! CHIP-8 Decompiler - CLI Entry Point
//!
//! Usage:
//! - `chip8-decomp <rom>` - Ask which mode to run, then decompile
//! - `chip8-decomp <rom> --mode asm` - Flat pseudo-assembly listing
//! - `chip8-decomp <rom> --mode pseudo` - Structured pseudocode and data dump
//! - `chip8-decomp <rom> --browse` - Interactive browser

use chip8::{AnalysisConfig, Decompiler, DecompileError, load_rom};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Flat pseudo-assembly, one line per word
    Asm,
    /// Structured pseudocode plus the data dump
    Pseudo,
    /// Data dump only
    Data,
    /// Symbol table as JSON
    Symbols,
    /// Every output
    All,
}

impl Mode {
    fn describe(self) -> &'static str {
        match self {
            Mode::Asm => "Pseudo Assembly",
            Mode::Pseudo => "Pseudo Python",
            Mode::Data => "a data dump",
            Mode::Symbols => "a symbol table",
            Mode::All => "every output format",
        }
    }
}

#[derive(Parser)]
#[command(name = "chip8-decomp")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "A static decompiler that recovers structured pseudocode from CHIP-8 ROMs")]
struct Cli {
    /// Path to the ROM image
    rom: PathBuf,
    /// Output to produce (asked interactively when omitted)
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,
    /// Directory for the output files
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,
    /// Print outputs instead of writing files
    #[arg(long)]
    stdout: bool,
    /// JSON file overriding analysis settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
    /// Open the interactive browser
    #[arg(short, long)]
    browse: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if !cli.rom.exists() {
        eprintln!("❌ Error: Invalid ROM path: '{}'", cli.rom.display());
        std::process::exit(1);
    }

    let config = match &cli.config {
        Some(path) => match AnalysisConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => AnalysisConfig::default(),
    };

    let image = match load_rom(&cli.rom, &config) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("❌ Failed to load ROM: {}", e);
            std::process::exit(1);
        }
    };
    let decompiler = Decompiler::new(image, config);

    if cli.browse {
        browse(&decompiler);
        return;
    }

    let mode = cli.mode.unwrap_or_else(prompt_mode);
    let started = Instant::now();
    println!("🔧 Decompiling ROM '{}' into {}", cli.rom.display(), mode.describe());

    let outputs = match produce(&decompiler, mode) {
        Ok(outputs) => outputs,
        Err(e) => {
            eprintln!("❌ Decompilation failed: {}", e);
            std::process::exit(1);
        }
    };

    if cli.stdout {
        for (_, text) in &outputs {
            print!("{}", text);
        }
    } else if let Err(e) = write_outputs(&cli.out_dir, &outputs) {
        eprintln!("❌ Failed to write output: {}", e);
        std::process::exit(1);
    }

    println!("✓ Finished decompiling, {}ms", started.elapsed().as_millis());
}

/// Ask for a mode on stdin. Anything but `1` or `2` is fatal.
fn prompt_mode() -> Mode {
    print!("What decomp mode would you like to use?\n1 - pseudo assembly\n2 - pseudo python (full analysis)\n:");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if let Err(e) = std::io::stdin().read_line(&mut answer) {
        eprintln!("❌ Failed to read mode: {}", e);
        std::process::exit(1);
    }

    match answer.trim() {
        "1" => Mode::Asm,
        "2" => Mode::Pseudo,
        other => {
            eprintln!("❌ Error: Invalid decomp mode {}", other);
            std::process::exit(1);
        }
    }
}

/// Produce the (file name, contents) pairs for a mode.
fn produce(decompiler: &Decompiler, mode: Mode) -> Result<Vec<(&'static str, String)>, DecompileError> {
    if mode == Mode::Asm {
        return Ok(vec![("asm.txt", decompiler.pseudo_assembly())]);
    }

    let analysis = decompiler.analyze()?;
    let mut outputs = Vec::new();

    if mode == Mode::All {
        outputs.push(("asm.txt", decompiler.pseudo_assembly()));
    }
    if matches!(mode, Mode::Pseudo | Mode::All) {
        outputs.push(("code.txt", decompiler.pseudocode(&analysis)?));
    }
    if matches!(mode, Mode::Pseudo | Mode::Data | Mode::All) {
        outputs.push(("data.txt", decompiler.data_dump(&analysis)));
    }
    if matches!(mode, Mode::Symbols | Mode::All) {
        outputs.push(("symbols.json", decompiler.symbols_json(&analysis)?));
    }

    Ok(outputs)
}

fn write_outputs(dir: &Path, outputs: &[(&str, String)]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for (name, text) in outputs {
        let path = dir.join(name);
        std::fs::write(&path, text)?;
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn browse(decompiler: &Decompiler) {
    use chip8::tui::{BrowserApp, run_browser};

    let app = match decompiler.analyze().and_then(|analysis| BrowserApp::new(decompiler, &analysis)) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("❌ Decompilation failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_browser(app) {
        eprintln!("❌ Browser error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn browse(_decompiler: &Decompiler) {
    eprintln!("❌ This build does not include the browser (enable the `tui` feature)");
    std::process::exit(1);
}
