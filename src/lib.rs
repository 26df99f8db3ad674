pub mod catalog;
pub mod cli;
pub mod config;
pub mod filter;
pub mod session;
pub mod view;

use colored::Colorize;
use std::io;

pub use catalog::{Field, FieldCatalog, FieldType};
pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use config::{ConfigError, load_catalog, load_catalog_from_path};
pub use filter::{
    FilterError, FilterModel, FilterRow, FilterValue, Operator, RowId, RowSpec, default_value,
    legal_operators,
};
pub use session::Session;
pub use view::{ModelView, RowView, ValueControl};

/// Print a warning for each row left out of the filter
fn print_skipped_row_warnings(model: &FilterModel) {
    for id in model.unselected_rows() {
        let position = model.position(id).map(|p| p + 1).unwrap_or_default();
        eprintln!(
            "{} row {} has no field selected and is left out of the filter",
            "Warning:".yellow().bold(),
            position
        );
    }
}

fn build_model(
    catalog: FieldCatalog,
    rows: &[String],
) -> Result<FilterModel, Box<dyn std::error::Error>> {
    let specs = rows
        .iter()
        .map(|r| RowSpec::parse(r))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid row: {}", e))?;

    let mut model = FilterModel::new(catalog);
    filter::apply_row_specs(&mut model, &specs)?;
    Ok(model)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli_parse();
    let verbose = cli.verbose;
    let quiet = cli.quiet;

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let catalog = load_catalog(cli.fields.as_deref())
        .map_err(|e| format!("Failed to load fields: {}", e))?;

    if verbose > 0 && !quiet {
        eprintln!("Verbosity level: {}", verbose);
        eprintln!("Color mode: {:?}", cli.color);
        match &cli.fields {
            Some(path) => eprintln!("Fields file: {}", path.display()),
            None => eprintln!("Fields file: none (empty catalog)"),
        }
        eprintln!("Catalog fields: {}", catalog.len());
    }

    match &cli.command {
        Commands::Build { rows } => {
            let model = build_model(catalog, rows)?;
            if verbose > 1 && !quiet {
                for (idx, row) in model.rows().iter().enumerate() {
                    eprintln!("Row {}: {:?}", idx + 1, row.clause());
                }
            }
            if !quiet {
                print_skipped_row_warnings(&model);
            }
            match cli.format {
                OutputFormat::Text => println!("{}", model.get_filter()),
                OutputFormat::Json => println!("{}", ModelView::from(&model).to_json()?),
            }
        }
        Commands::Fields => match cli.format {
            OutputFormat::Text => {
                if catalog.is_empty() {
                    println!("No fields in catalog");
                } else {
                    println!("{}", view::fields_table(&catalog));
                }
            }
            OutputFormat::Json => {
                let options = view::field_options(&catalog);
                println!("{}", serde_json::to_string_pretty(&options)?);
            }
        },
        Commands::Operators { field_type } => {
            let field_type: FieldType = field_type.parse()?;
            let ops: Vec<&str> = legal_operators(field_type)
                .iter()
                .map(Operator::as_str)
                .collect();
            match cli.format {
                OutputFormat::Text => println!("{}", ops.join(" ")),
                OutputFormat::Json => println!("{}", serde_json::to_string(&ops)?),
            }
        }
        Commands::Interactive => {
            let mut session = Session::new(FilterModel::new(catalog));
            if !quiet {
                eprintln!("{}", "Type 'help' for commands, 'quit' to finish.".dimmed());
            }
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session
                .run(stdin.lock(), &mut stdout)
                .map_err(|e| format!("Session failed: {}", e))?;
            println!("{}", session.model().get_filter());
        }
    }

    Ok(())
}
