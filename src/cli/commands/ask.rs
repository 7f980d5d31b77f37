//! Ask Command
//!
//! Usage:
//!   churnguard ask "<question>" [-f json]
//!   churnguard suggest

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, OutputFormat, print_json};
use crate::types::Result;

pub async fn run(question: &str, format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let answer = ctx.assistant.answer_with_source(question).await;

    if format == OutputFormat::Json {
        return print_json(&answer);
    }

    let out = Output::new();
    out.section(question);
    out.block(&answer.text);
    println!();
    out.info(&format!("Answered by {}", answer.source));
    Ok(())
}

pub fn suggest() -> Result<()> {
    let out = Output::new();
    out.section("Try asking");
    for question in crate::ai::suggested_questions() {
        println!("  • {}", question);
    }
    Ok(())
}
