use std::{env, path::PathBuf, process};

use colored::Colorize;
use thiserror::Error;

use expense_core::{
    config::{Config, ConfigManager},
    core::services::InvoiceView,
    currency::{format_amount, format_percent, CurrencyCode, LocaleConfig},
    domain::EntityId,
    errors::{EngineError, StoreError},
    init,
    storage::{ExpenseSnapshot, JsonSnapshotStore, SnapshotBackend},
    utils::build_info,
    AggregationService, DashboardService, FilterService, InvoiceCriteria, PeriodChange,
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Usage(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() {
    init();

    if let Err(err) = run(env::args().skip(1).collect()) {
        if matches!(err, CliError::Usage(_)) {
            print_usage();
        }
        eprintln!("{} {err}", "Error:".red().bold());
        process::exit(1);
    }
}

/// Money and percentage rendering bound to the loaded configuration.
struct Formatter {
    currency: CurrencyCode,
    locale: LocaleConfig,
}

impl Formatter {
    fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency_code(),
            locale: config.locale_config(),
        }
    }

    fn money(&self, amount: f64) -> String {
        format_amount(amount, &self.currency, &self.locale)
    }
}

fn run(args: Vec<String>) -> CliResult<()> {
    let mut args = args.into_iter();
    let command = args
        .next()
        .ok_or_else(|| CliError::Usage("missing command".into()))?;

    if command == "version" {
        println!("{}", build_info::current().summary());
        return Ok(());
    }

    let path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| CliError::Usage(format!("`{command}` needs a snapshot path")))?;
    let rest: Vec<String> = args.collect();

    let config = ConfigManager::new().load()?;
    let fmt = Formatter::from_config(&config);
    let store = JsonSnapshotStore;
    let mut snapshot = store.load(&path)?;

    match command.as_str() {
        "summary" => print_summary(&snapshot, &fmt),
        "entities" => print_entities(&snapshot, &fmt),
        "quarters" => print_quarters(&snapshot, &fmt)?,
        "invoices" => {
            let criteria = parse_criteria(&rest)?;
            let view = FilterService::view(&snapshot.invoices, &criteria);
            print_invoices(&view, &fmt);
        }
        "entity-add" => {
            let name = required(&rest, 0, "entity name")?;
            let color = rest
                .get(1)
                .cloned()
                .unwrap_or_else(|| config.default_entity_color.clone());
            let mut registry = snapshot.registry()?;
            let entity = registry.add(name, &color)?;
            snapshot.store_registry(&registry);
            store.save(&snapshot, &path)?;
            println!("{} {}", "Entity added:".green(), entity.name);
            println!("id: {}", entity.id);
        }
        "entity-update" => {
            let id = parse_id(required(&rest, 0, "entity id")?)?;
            let name = required(&rest, 1, "entity name")?;
            let mut registry = snapshot.registry()?;
            let color = match rest.get(2) {
                Some(color) => color.clone(),
                None => registry
                    .get(id)
                    .map(|entity| entity.color.clone())
                    .ok_or_else(|| EngineError::NotFound(format!("entity {id}")))?,
            };
            let updated = registry.update(id, name, &color)?.name.clone();
            snapshot.store_registry(&registry);
            store.save(&snapshot, &path)?;
            println!("{} {}", "Entity updated:".green(), updated);
        }
        "entity-remove" => {
            let id = parse_id(required(&rest, 0, "entity id")?)?;
            let mut registry = snapshot.registry()?;
            let removed = registry.remove(id)?;
            snapshot.store_registry(&registry);
            store.save(&snapshot, &path)?;
            println!("{} {}", "Entity removed:".green(), removed.name);
        }
        "recompute" => {
            let mut registry = snapshot.registry()?;
            registry.recompute_all(&snapshot.invoices)?;
            snapshot.store_registry(&registry);
            store.save(&snapshot, &path)?;
            println!("Recomputed totals for {} entities.", registry.len());
        }
        other => return Err(CliError::Usage(format!("unknown command `{other}`"))),
    }

    Ok(())
}

fn required<'a>(args: &'a [String], index: usize, what: &str) -> CliResult<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("missing {what}")))
}

fn parse_id(raw: &str) -> CliResult<EntityId> {
    raw.parse()
        .map_err(|_| CliError::Usage(format!("`{raw}` is not a valid entity id")))
}

fn parse_criteria(args: &[String]) -> CliResult<InvoiceCriteria> {
    let (mut search, mut entity, mut category, mut status) = ("", "", "", "");
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| CliError::Usage(format!("`{flag}` needs a value")))?;
        match flag.as_str() {
            "--search" => search = value.as_str(),
            "--entity" => entity = value.as_str(),
            "--category" => category = value.as_str(),
            "--status" => status = value.as_str(),
            other => return Err(CliError::Usage(format!("unknown option `{other}`"))),
        }
    }
    Ok(InvoiceCriteria::from_form(search, entity, category, status)?)
}

fn describe_change(change: Option<PeriodChange>) -> String {
    match change {
        Some(PeriodChange::Percent(value)) => {
            let label = format!("{} from last month", format_percent(value, 1, true));
            if value >= 0.0 {
                label.green().to_string()
            } else {
                label.red().to_string()
            }
        }
        Some(PeriodChange::NoBaseline) => "no spending last month".yellow().to_string(),
        None => "not enough data".dimmed().to_string(),
    }
}

fn print_summary(snapshot: &ExpenseSnapshot, fmt: &Formatter) {
    let overview =
        DashboardService::overview(&snapshot.entities, &snapshot.invoices, &snapshot.monthly);

    println!("{}", "Expense overview".bold());
    println!("  Total expenses:   {}", fmt.money(overview.total_expenses));
    match overview.average_per_period {
        Some(average) => println!("  Monthly average:  {}", fmt.money(average.round())),
        None => println!("  Monthly average:  n/a"),
    }
    if let Some(current) = &overview.current_period {
        println!(
            "  This month:       {} ({})",
            fmt.money(current.amount),
            describe_change(overview.period_change)
        );
    }
    println!("  Active entities:  {}", overview.active_entities);

    println!("\n{}", "Entity breakdown".bold());
    for row in &overview.entity_breakdown {
        println!(
            "  {:<28} {:>12} {:>7}",
            row.name,
            fmt.money(row.total_expenses),
            format_percent(row.share, 1, false)
        );
    }

    println!("\n{}", "Expense categories".bold());
    for category in &overview.category_breakdown {
        println!(
            "  {:<28} {:>12} {:>7}",
            category.name,
            fmt.money(category.amount),
            format_percent(category.percentage, 0, false)
        );
    }
}

fn print_entities(snapshot: &ExpenseSnapshot, fmt: &Formatter) {
    let entities = &snapshot.entities;
    println!("{} ({})", "Entities".bold(), entities.len());
    if entities.is_empty() {
        println!("  No entities yet.");
        return;
    }
    for entity in entities {
        println!(
            "  #{:<4} {:<28} {:<9} {:>12} {:>7}",
            entity.id,
            entity.name,
            entity.color,
            fmt.money(entity.total_expenses),
            format_percent(AggregationService::entity_share(entity, entities), 1, false)
        );
    }
    println!(
        "  Combined: {}  Average per entity: {}",
        fmt.money(AggregationService::total_expenses(entities)),
        fmt.money(AggregationService::average_per_entity(entities).round())
    );
}

fn print_quarters(snapshot: &ExpenseSnapshot, fmt: &Formatter) -> CliResult<()> {
    let quarters = AggregationService::quarterly_rollup(&snapshot.monthly)?;
    println!("{}", "Quarterly expenses".bold());
    for quarter in quarters {
        println!("  {:<3} {:>12}", quarter.label, fmt.money(quarter.amount));
    }
    Ok(())
}

fn print_invoices(view: &InvoiceView, fmt: &Formatter) {
    let summary = &view.summary;
    let scope = if view.is_filtered() {
        format!(" of {} total", view.unfiltered_count)
    } else {
        String::new()
    };
    println!("{} {}{}", "Invoices:".bold(), summary.count, scope);
    for invoice in &view.invoices {
        println!(
            "  {:<14} {:<18} {:<20} {:<16} {:>12} {} {}",
            invoice.number,
            invoice.vendor,
            invoice.entity,
            invoice.category,
            fmt.money(invoice.amount),
            invoice.date,
            invoice.status
        );
    }
    println!(
        "Total: {}  Approved: {} ({} invoices)  Pending: {}",
        fmt.money(summary.total_amount),
        fmt.money(summary.approved_amount),
        summary.approved_count,
        summary.pending_count
    );
}

fn print_usage() {
    eprintln!(
        "Usage: expense_core_cli <command> <snapshot.json> [args]\n\
         Commands:\n  \
         summary <file>\n  \
         entities <file>\n  \
         quarters <file>\n  \
         invoices <file> [--search T] [--entity E] [--category C] [--status S]\n  \
         entity-add <file> <name> [color]\n  \
         entity-update <file> <id> <name> [color]\n  \
         entity-remove <file> <id>\n  \
         recompute <file>\n  \
         version"
    );
}
