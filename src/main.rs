use colored::Colorize;

fn main() {
    if let Err(e) = odata_filter_ui::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
