//! CLI tool for generating a pitch deck from a Word document and a PowerPoint template.

use anyhow::{bail, Context, Result};
use clap::Parser;
use deckgen::{deck_plan, FieldMapping, DEFAULT_OUTPUT_FILENAME};
use deckgen_docx::DocxExtractor;
use deckgen_pptx::{populate, DeckReader, Presentation};
use std::path::{Path, PathBuf};

/// Fill a PowerPoint template with the content controls of a Word document.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Word document (.docx) with the aliased content controls
    document: PathBuf,

    /// PowerPoint template (.pptx) providing the slide layouts
    template: PathBuf,

    /// Output file (default: Apresentacao_ProjetoIntegrador2_Senac.pptx in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the extracted fields as JSON
    #[arg(long)]
    fields: bool,

    /// Print the template's layouts and their placeholders
    #[arg(long)]
    layouts: bool,

    /// Verbose output; also lists the shapes of every written slide
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    check_input(&args.document, "document")?;
    check_input(&args.template, "template")?;

    let fields = DocxExtractor::new()
        .extract_path(&args.document)
        .with_context(|| format!("Failed to read fields from {}", args.document.display()))?;
    if args.verbose {
        eprintln!(
            "Extracted {} non-empty fields from {}",
            fields.filled_count(),
            args.document.display()
        );
    }
    if args.fields {
        println!("{}", fields_json(&fields)?);
    }

    let mut presentation = Presentation::open(&args.template)
        .with_context(|| format!("Failed to load template {}", args.template.display()))?;
    if args.layouts {
        print_layouts(&presentation);
    }

    populate(&mut presentation, &deck_plan(&fields))
        .with_context(|| format!("Failed to build slides from {}", args.template.display()))?;

    let output_path = get_output_path(args.output.as_deref())?;
    presentation
        .save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "Saved {} slides to {}",
        presentation.slides().len(),
        output_path.display()
    );

    if args.verbose {
        print_deck(&output_path)?;
    }

    Ok(())
}

/// Fail early with a readable message when an input file is missing.
fn check_input(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        bail!("The {} {} does not exist", what, path.display());
    }
    Ok(())
}

fn fields_json(fields: &FieldMapping) -> Result<String> {
    serde_json::to_string_pretty(fields).context("Failed to serialize fields")
}

fn print_layouts(presentation: &Presentation) {
    for (name, placeholders) in presentation.layout_catalog() {
        println!("{}", name);
        for placeholder in placeholders {
            println!("  {}", placeholder);
        }
    }
}

/// Read the written deck back and list every slide's shapes.
fn print_deck(path: &Path) -> Result<()> {
    let slides = DeckReader::new()
        .read_path(path)
        .with_context(|| format!("Failed to read back {}", path.display()))?;

    for slide in &slides {
        eprintln!(
            "Slide {} ({})",
            slide.number,
            slide.layout.as_deref().unwrap_or("no layout")
        );
        for shape in &slide.shapes {
            eprintln!("  {}: {:?}", shape.name, shape.text);
        }
    }
    Ok(())
}

/// Determine where the deck is written.
fn get_output_path(output: Option<&Path>) -> Result<PathBuf> {
    let Some(path) = output else {
        return Ok(PathBuf::from(DEFAULT_OUTPUT_FILENAME));
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen::Field;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "deckgen",
            "ideia.docx",
            "modelo.pptx",
            "-o",
            "out/deck.pptx",
            "--fields",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.document, PathBuf::from("ideia.docx"));
        assert_eq!(args.template, PathBuf::from("modelo.pptx"));
        assert_eq!(args.output, Some(PathBuf::from("out/deck.pptx")));
        assert!(args.fields);
        assert!(!args.layouts);
        assert!(args.verbose);
    }

    #[test]
    fn test_both_inputs_required() {
        assert!(Args::try_parse_from(["deckgen", "ideia.docx"]).is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            get_output_path(None).unwrap(),
            PathBuf::from("Apresentacao_ProjetoIntegrador2_Senac.pptx")
        );
        assert_eq!(
            get_output_path(Some(Path::new("deck.pptx"))).unwrap(),
            PathBuf::from("deck.pptx")
        );
    }

    #[test]
    fn test_check_input_missing() {
        let err = check_input(Path::new("definitely/missing.docx"), "document").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The document definitely/missing.docx does not exist"
        );
    }

    #[test]
    fn test_fields_json_has_every_key() {
        let mut fields = FieldMapping::new();
        fields.insert(Field::Theme, "Minha Ideia");

        let json: serde_json::Value = serde_json::from_str(&fields_json(&fields).unwrap()).unwrap();
        assert_eq!(json["theme"], "Minha Ideia");
        assert_eq!(json["closing"], "");
        assert_eq!(json.as_object().unwrap().len(), Field::ALL.len());
    }
}
