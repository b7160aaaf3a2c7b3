use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use growthref_core::UndefinedTally;
use growthref_model::{Sex, UndefinedReason};
use growthref_standards::ReferenceSummary;

use growthref_cli::selftest::CaseOutcome;

use crate::types::{BatchResult, LookupResult};

pub fn print_batch_summary(result: &BatchResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Outcome"),
        header_cell("zbmi"),
        header_cell("zhfa"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("defined").fg(Color::Green),
        count_cell(result.bmi.defined, Color::Green),
        count_cell(result.height.defined, Color::Green),
    ]);
    for reason in UndefinedReason::ALL {
        let (bmi, height) = (result.bmi.count(reason), result.height.count(reason));
        if bmi == 0 && height == 0 {
            continue;
        }
        table.add_row(vec![
            Cell::new(reason.code()),
            count_cell(bmi, Color::Yellow),
            count_cell(height, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.rows).add_attribute(Attribute::Bold),
        Cell::new(result.rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    warn_if_nothing_scored("zbmi", &result.bmi);
    warn_if_nothing_scored("zhfa", &result.height);
}

fn warn_if_nothing_scored(column: &str, tally: &UndefinedTally) {
    if tally.total > 0 && tally.defined == 0 {
        eprintln!("warning: no row produced a {column} value");
    }
}

pub fn print_lookup(result: &LookupResult) {
    let sex = Sex::from_code(result.sex).map_or("?", |sex| sex.as_str());
    println!(
        "{} | sex {} ({sex}) | age {} months",
        result.indicator.as_str(),
        result.sex,
        result.age_months
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("L"), header_cell("M"), header_cell("S")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(format!("{:.4}", result.lms.l)),
        Cell::new(format!("{:.4}", result.lms.m)),
        Cell::new(format!("{:.5}", result.lms.s)),
    ]);
    println!("{table}");
}

pub fn print_reference(summary: &ReferenceSummary) {
    if let Some(provenance) = &summary.provenance {
        println!("Reference: {}", provenance.dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Indicator"),
        header_cell("Sex"),
        header_cell("Rows"),
        header_cell("Ages (months)"),
        header_cell("Missing"),
        header_cell("Unusable"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for table_summary in &summary.tables {
        if table_summary.coverage.is_empty() {
            table.add_row(vec![
                Cell::new(table_summary.indicator.as_str()),
                dim_cell("-"),
                count_cell(0, Color::Red),
                dim_cell("-"),
                count_cell(table_summary.missing_keys, Color::Red),
                count_cell(table_summary.unusable_keys, Color::Red),
            ]);
            continue;
        }
        for (idx, coverage) in table_summary.coverage.iter().enumerate() {
            let indicator = if idx == 0 {
                Cell::new(table_summary.indicator.as_str())
            } else {
                dim_cell("")
            };
            let (missing, unusable) = if idx == 0 {
                (
                    count_cell(table_summary.missing_keys, Color::Yellow),
                    count_cell(table_summary.unusable_keys, Color::Red),
                )
            } else {
                (dim_cell(""), dim_cell(""))
            };
            table.add_row(vec![
                indicator,
                Cell::new(coverage.sex.as_str()),
                Cell::new(coverage.rows),
                Cell::new(format!(
                    "{}-{}",
                    coverage.min_age_months, coverage.max_age_months
                )),
                missing,
                unusable,
            ]);
        }
    }
    println!("{table}");

    if let Some(provenance) = &summary.provenance {
        let mut files = Table::new();
        files.set_header(vec![
            header_cell("Indicator"),
            header_cell("File"),
            header_cell("SHA-256"),
        ]);
        apply_table_style(&mut files);
        for file in &provenance.files {
            files.add_row(vec![
                Cell::new(file.indicator.code()),
                Cell::new(file.path.display()),
                dim_cell(&file.sha256),
            ]);
        }
        println!("{files}");
    }
}

pub fn print_selftest(outcomes: &[CaseOutcome]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Expected"),
        header_cell("Actual"),
        header_cell("Result"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for outcome in outcomes {
        let result = if outcome.passed() {
            Cell::new("ok").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(outcome.case.label),
            Cell::new(outcome.case.expected),
            Cell::new(outcome.actual),
            result,
        ]);
    }
    println!("{table}");
    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    if failed == 0 {
        println!("All {} validation cases passed.", outcomes.len());
    } else {
        eprintln!("{failed} of {} validation cases failed.", outcomes.len());
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
