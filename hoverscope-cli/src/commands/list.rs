//! List command - catalog entities

use clap::Parser;
use hoverscope_core::Category;

use super::GlobalArgs;
use crate::output::{category_color, color};

/// List catalog entities
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only this category (instrument, survey, simulation, model, person)
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<Category>,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

pub fn run(global: &GlobalArgs, args: ListArgs) -> Result<(), String> {
    let engine = global.load_engine()?;
    let table = engine.table();

    let records: Vec<_> = table
        .iter()
        .filter(|r| args.category.map_or(true, |c| r.category == c))
        .collect();

    if records.is_empty() {
        println!("No entities found");
        return Ok(());
    }

    let width = records.iter().map(|r| r.id.len()).max().unwrap_or(0);
    for record in &records {
        println!(
            "{:<width$}  {:<10}  {}",
            record.id,
            color(category_color(record.category), record.category.as_str()),
            record.name,
            width = width
        );
    }

    for skipped in table.skipped() {
        eprintln!(
            "{} skipped {} entry '{}': {}",
            color("33", "warning:"),
            skipped.category,
            skipped.id,
            skipped.reason
        );
    }
    Ok(())
}
