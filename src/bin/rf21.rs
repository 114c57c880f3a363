//!
//! # rf21 Design Conversion CLI
//!
//! Converts declarative YAML design documents to assembled-layout files,
//! and checks documents against the design-document schema.
//!

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Parser, Subcommand};

use rf21::components::ComponentRegistry;
use rf21::pdk::PdkRegistry;
use rf21::ser::{SerdeFile, SerializationFormat};
use rf21::yaml::{load_design, validate_document};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// RF Layout Synthesis CLI
#[derive(Parser)]
pub struct ProgramOptions {
    #[clap(subcommand)]
    command: Command,
    /// Verbose Output Mode
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a YAML design document to an assembled-layout file
    Convert {
        /// Design Document (YAML)
        doc: PathBuf,
        /// Output File. Defaults to the document path with a ".json" extension.
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a YAML design document against the document schema
    Validate {
        /// Design Document (YAML)
        doc: PathBuf,
    },
}

pub fn main() {
    let options = ProgramOptions::parse();
    if let Err(err) = _main(&options) {
        eprintln!("Error: {}", err);
        exit(1);
    }
}

/// Pick the output serialization format from the file extension.
/// Everything but "yaml" / "yml" serializes as JSON.
fn format_for(path: &Path) -> SerializationFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => SerializationFormat::Yaml,
        _ => SerializationFormat::Json,
    }
}

pub fn _main(options: &ProgramOptions) -> Result<(), Box<dyn Error>> {
    match &options.command {
        Command::Convert { doc, output } => convert(doc, output.as_deref(), options.verbose),
        Command::Validate { doc } => validate(doc, options.verbose),
    }
}

fn convert(doc: &Path, output: Option<&Path>, verbose: bool) -> Result<(), Box<dyn Error>> {
    let components = ComponentRegistry::with_builtins();
    let pdks = PdkRegistry::with_builtins();
    let mut design = load_design(doc, &components, &pdks)?;
    if verbose {
        println!(
            "loaded design \"{}\" ({} components, technology \"{}\")",
            design.name,
            design.components.len(),
            design.technology
        );
    }

    let layout = design.assemble()?;
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => doc.with_extension("json"),
    };
    layout.save(format_for(&output), &output)?;
    if verbose {
        println!(
            "assembled {} cells, {} polygons",
            layout.cells.len(),
            layout.num_elems()
        );
    }
    println!("Converted {} to {}", doc.display(), output.display());
    Ok(())
}

fn validate(doc: &Path, verbose: bool) -> Result<(), Box<dyn Error>> {
    let file = std::io::BufReader::new(std::fs::File::open(doc)?);
    let data: serde_yaml::Value = serde_yaml::from_reader(file)?;
    let errors = validate_document(&data);
    if !errors.is_empty() {
        println!("Validation failed for {}:", doc.display());
        for error in &errors {
            println!("  - {}", error);
        }
        exit(1);
    }
    if verbose {
        println!("document is a well-formed mapping, no schema violations");
    }
    println!("Validation successful for {}", doc.display());
    Ok(())
}
