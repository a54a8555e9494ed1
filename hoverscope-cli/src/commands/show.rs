//! Show command - render one entity's fields

use clap::{Parser, ValueEnum};
use serde_json::json;

use super::GlobalArgs;
use crate::output::{category_color, color};

/// Output format for entity details
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ShowFormat {
    /// Heading, fields, description
    #[default]
    Human,
    /// Rendered record as JSON
    Json,
}

/// Show one entity's details
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Entity identifier
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: ShowFormat,
}

pub fn run(global: &GlobalArgs, args: ShowArgs) -> Result<(), String> {
    let engine = global.load_engine()?;
    let record = engine
        .table()
        .get(&args.id)
        .ok_or_else(|| format!("Unknown entity '{}'", args.id))?;
    let rendered = engine
        .render(&args.id)
        .ok_or_else(|| format!("Unknown entity '{}'", args.id))?;

    match args.format {
        ShowFormat::Human => {
            println!(
                "{} {}",
                color("1", &rendered.name),
                color(category_color(record.category), &format!("[{}]", record.category))
            );
            if !record.aliases.is_empty() {
                println!("  aka {}", record.aliases.join(", "));
            }
            let width = rendered
                .fields
                .iter()
                .map(|f| f.label.chars().count())
                .max()
                .unwrap_or(0);
            for field in &rendered.fields {
                println!("  {:<width$}  {}", field.label, field.value, width = width);
            }
            if let Some(description) = &rendered.description {
                println!();
                println!("  {}", description);
            }
        }
        ShowFormat::Json => {
            let value = json!({
                "id": record.id,
                "category": record.category,
                "name": rendered.name,
                "fields": rendered.fields,
                "description": rendered.description,
            });
            let text = serde_json::to_string_pretty(&value)
                .map_err(|e| format!("Failed to serialize record: {}", e))?;
            println!("{}", text);
        }
    }
    Ok(())
}
