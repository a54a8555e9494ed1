//! Annotate command - find entity mentions in text

use clap::{Parser, ValueEnum};
use hoverscope::{Annotation, Segment, SpanConverter};
use serde::Serialize;

use super::{get_input_text, GlobalArgs};
use crate::output::{category_color, color, highlighted, markup};

/// Output format for annotations
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum AnnotateFormat {
    /// Highlighted text plus a match table
    #[default]
    Human,
    /// Segments with byte and char offsets
    Json,
    /// `[text](id)` markup
    Plain,
}

/// Find entity mentions in text
#[derive(Parser, Debug)]
pub struct AnnotateArgs {
    /// Input text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read input from file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: AnnotateFormat,

    /// Text to annotate (alternative to -t)
    #[arg(trailing_var_arg = true)]
    pub positional: Vec<String>,
}

#[derive(Serialize)]
struct JsonSegment<'a> {
    kind: &'static str,
    text: &'a str,
    start: usize,
    end: usize,
    char_start: usize,
    char_end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
}

#[derive(Serialize)]
struct JsonAnnotation<'a> {
    matches: usize,
    segments: Vec<JsonSegment<'a>>,
}

pub fn run(global: &GlobalArgs, args: AnnotateArgs) -> Result<(), String> {
    let text = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;
    let engine = global.load_engine()?;
    let annotation = engine.annotate(&text);

    match args.format {
        AnnotateFormat::Human => print_human(&annotation),
        AnnotateFormat::Json => {
            let json = to_json(&text, &annotation);
            let rendered = serde_json::to_string_pretty(&json)
                .map_err(|e| format!("Failed to serialize annotation: {}", e))?;
            println!("{}", rendered);
        }
        AnnotateFormat::Plain => println!("{}", markup(&annotation)),
    }
    Ok(())
}

fn to_json<'a>(text: &str, annotation: &'a Annotation) -> JsonAnnotation<'a> {
    let converter = SpanConverter::new(text);
    let segments = annotation
        .segments
        .iter()
        .map(|segment| {
            let chars = converter.span(segment.range());
            let range = segment.range();
            let (kind, category) = match segment {
                Segment::Text { .. } => ("text", None),
                Segment::Entity { category, .. } => ("entity", Some(category.as_str())),
            };
            JsonSegment {
                kind,
                text: segment.text(),
                start: range.start,
                end: range.end,
                char_start: chars.char_start,
                char_end: chars.char_end,
                entity_id: segment.entity_id(),
                category,
            }
        })
        .collect();
    JsonAnnotation {
        matches: annotation.match_count(),
        segments,
    }
}

fn print_human(annotation: &Annotation) {
    println!("{}", highlighted(annotation).trim_end());
    println!();

    if annotation.match_count() == 0 {
        println!("No entities found");
        return;
    }

    println!("{} entities:", annotation.match_count());
    for segment in annotation.entities() {
        if let Segment::Entity {
            text,
            entity_id,
            category,
            start,
            end,
        } = segment
        {
            println!(
                "  {:<10} {} -> {} ({}..{})",
                color(category_color(*category), category.as_str()),
                text,
                entity_id,
                start,
                end
            );
        }
    }
}
