//! Full training report rendering.

use colored::Colorize;
use trainbench_training::FullResultView;

/// Prints the full report: status, model, problem type, all metrics and the download link.
pub fn print_report(view: &FullResultView) {
    println!();
    println!("{}", "✅ Training Results".bold().green());
    println!();
    println!("  {} {}", "Status:".bold(), view.status);
    println!("  {} {}", "Model:".bold(), view.model_name.cyan());
    println!("  {} {}", "Problem Type:".bold(), view.problem_type);
    if let Some(file) = &view.server_file {
        println!("  {} {}", "Saved As:".bold(), file.dimmed());
    }
    println!();
    println!("{}", "📊 Metrics".bold().cyan());
    for line in view.metrics_json.lines() {
        println!("  {line}");
    }
    println!();
    match &view.download_url {
        Some(url) => {
            println!("{}", "📥 Download Trained Model".bold().cyan());
            println!("  {}", url.underline());
        }
        None => println!("  {}", "No download link available.".dimmed()),
    }
    println!();
}
