use schemadraw::drawio::{DrawioRenderer, PageConfig};
use schemadraw::layout::GridLayout;
use schemadraw::merge::Merger;
use schemadraw::{generate_diagram, schema};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

const DEFAULT_DIAGRAM_FILE: &str = "database-schema.drawio";

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  generate <schema.json>   Generate a draw.io ERD from a schema export");
    eprintln!("      -o, --output <file>  Output file (default: {DEFAULT_DIAGRAM_FILE})");
    eprintln!("      -n, --name <name>    Diagram name (default: \"Database Schema\")");
    eprintln!("  template                 Emit an empty draw.io document scaffold");
    eprintln!("      -o, --output <file>  Output file (default: stdout)");
    eprintln!("  merge <dir>              Concatenate source files into one text blob");
    eprintln!("      -o, --output <file>  Output file (default: stdout)");
    eprintln!("      -e, --ext <list>     Comma-separated extensions (default: ts,tsx,js,jsx)");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    match args[1].as_str() {
        "generate" => run_generate(&args),
        "template" => run_template(&args),
        "merge" => run_merge(&args),
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_usage(&args[0]);
            process::exit(1);
        }
    }
}

fn run_generate(args: &[String]) {
    if args.len() < 3 {
        eprintln!("generate: missing schema file");
        process::exit(1);
    }
    let input_path = PathBuf::from(&args[2]);
    let mut output_path = PathBuf::from(DEFAULT_DIAGRAM_FILE);
    let mut page = PageConfig::default();

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = PathBuf::from(&args[i]);
                }
            }
            "-n" | "--name" => {
                i += 1;
                if i < args.len() {
                    page.diagram_name = args[i].clone();
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let tables = match schema::load_tables(&input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to load {}: {}", input_path.display(), e);
            process::exit(1);
        }
    };

    let xml = generate_diagram(&tables, page);

    if let Err(e) = fs::write(&output_path, &xml) {
        eprintln!("Failed to write {}: {}", output_path.display(), e);
        process::exit(1);
    }
    println!(
        "Generated {} with {} tables",
        output_path.display(),
        tables.len()
    );
}

fn run_template(args: &[String]) {
    let mut output_path: Option<PathBuf> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(PathBuf::from(&args[i]));
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    // The scaffold is the document skeleton with no tables on it.
    let layout = GridLayout::default().layout(&[]);
    let xml = DrawioRenderer::default().render(&layout, &[]);

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &xml) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
            println!("Generated {}", path.display());
        }
        None => print!("{xml}"),
    }
}

fn run_merge(args: &[String]) {
    if args.len() < 3 {
        eprintln!("merge: missing input directory");
        process::exit(1);
    }
    let root = PathBuf::from(&args[2]);
    let mut output_path: Option<PathBuf> = None;
    let mut extensions: Option<Vec<String>> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(PathBuf::from(&args[i]));
                }
            }
            "-e" | "--ext" => {
                i += 1;
                if i < args.len() {
                    extensions = Some(
                        args[i]
                            .split(',')
                            .map(|e| e.trim().to_lowercase())
                            .filter(|e| !e.is_empty())
                            .collect(),
                    );
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut merger = Merger::new(root).with_output(output_path.clone());
    if let Some(exts) = extensions {
        merger = merger.with_extensions(exts);
    }

    match merger.merge() {
        Ok(stats) => {
            if let Some(path) = output_path {
                println!(
                    "Merged {} files ({} bytes) into {}",
                    stats.files_merged,
                    stats.bytes_written,
                    path.display()
                );
            }
        }
        Err(e) => {
            eprintln!("Merge failed: {e}");
            process::exit(1);
        }
    }
}
