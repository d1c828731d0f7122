// src/bin/json_to_excel.rs
use dotenv::dotenv;
use nearby_places::config::Config;
use nearby_places::services::{
    ExcelExporter, JsonLoader, MergedTable, TableMerger, SOURCE_COLUMN,
};
use std::path::Path;
use std::process;

// --- ANSI colors for the terminal ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";

// --- Runner Logic ---

struct MergeRunner {
    config: Config,
}

impl MergeRunner {
    fn new(config: Config) -> Self {
        Self { config }
    }

    fn run(&self) -> bool {
        self.print_header();

        let input_dir = Path::new(&self.config.merge_input_dir);
        let documents = JsonLoader::load_from_directory(input_dir, &self.config.merge_pattern);

        if documents.is_empty() {
            println!(
                "{}❌ No JSON data loaded from {}{}",
                RED, self.config.merge_input_dir, RESET
            );
            return false;
        }

        println!(
            "{}📊 Documents loaded: {}{}{}",
            BOLD, BLUE, documents.len(), RESET
        );

        let table = match TableMerger::combine(
            &documents,
            self.config.merge_source_column,
            SOURCE_COLUMN,
        ) {
            Some(table) => table,
            None => {
                println!("{}❌ No data could be processed{}", RED, RESET);
                return false;
            }
        };

        if table.rows.is_empty() {
            println!(
                "{}⚠️  All documents were empty, writing a header-only workbook{}",
                YELLOW, RESET
            );
        }

        self.print_preview(&table);
        self.print_summary(&table, documents.len());

        let output = Path::new(&self.config.merge_output);
        let saved = if self.config.merge_styled {
            ExcelExporter::save_styled(&table, output)
        } else {
            ExcelExporter::save_simple(&table, output)
        };

        if saved {
            println!(
                "\n{}✨ Saved {} rows to {}{}",
                GREEN,
                table.rows.len(),
                self.config.merge_output,
                RESET
            );
        } else {
            println!(
                "\n{}❌ Failed to save {}{}",
                RED, self.config.merge_output, RESET
            );
        }

        saved
    }

    fn print_header(&self) {
        println!(
            "{}╔══════════════════════════════════════════════════════════════╗{}",
            CYAN, RESET
        );
        println!(
            "{}║   📁 JSON to Excel Converter                                 ║{}",
            CYAN, RESET
        );
        println!(
            "{}╚══════════════════════════════════════════════════════════════╝{}",
            CYAN, RESET
        );
        println!(
            "\n{}📂 Input: {}/{}{}",
            BOLD, self.config.merge_input_dir, self.config.merge_pattern, RESET
        );
    }

    fn print_preview(&self, table: &MergedTable) {
        println!(
            "\n{}📊 Combined Data Preview (first {} rows):{}",
            BOLD, self.config.merge_preview_rows, RESET
        );
        println!("{}", "=".repeat(80));
        print!("{}", table.preview(self.config.merge_preview_rows));

        println!("\nTotal rows: {}", table.rows.len());
        println!("Total columns: {}", table.columns.len());
        println!("Columns: {:?}", table.columns);

        let counts = table.source_counts();
        if !counts.is_empty() {
            println!("\nData distribution by source file:");
            for (name, count) in counts {
                println!("{:<30} {:>6}", name, count);
            }
        }
    }

    fn print_summary(&self, table: &MergedTable, files_processed: usize) {
        println!("\n{}📈 Summary Statistics{}", BOLD, RESET);
        println!("{}", "=".repeat(50));
        println!("Total files processed: {}", files_processed);
        println!("Total rows: {}", table.rows.len());
        println!("Total columns: {}", table.columns.len());

        let summaries = table.numeric_summary();
        if !summaries.is_empty() {
            println!("\n{}Numeric columns summary:{}", MAGENTA, RESET);
            println!(
                "{:<24} {:>8} {:>12} {:>12} {:>12}",
                "Column", "Count", "Mean", "Min", "Max"
            );
            println!("{}", "─".repeat(72));
            for summary in &summaries {
                println!(
                    "{:<24} {:>8} {:>12.2} {:>12.2} {:>12.2}",
                    summary.column, summary.count, summary.mean, summary.min, summary.max
                );
            }
        }
    }
}

fn main() {
    dotenv().ok();

    let config = Config::from_env();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    let runner = MergeRunner::new(config);
    if !runner.run() {
        process::exit(1);
    }
}
