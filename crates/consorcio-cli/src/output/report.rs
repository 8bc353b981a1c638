use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use std::fmt::Write;

use consorcio_core::comparison::Comparison;
use consorcio_core::config::get_config;
use consorcio_core::consortium::ConsortiumResult;
use consorcio_core::financing::FinancingResult;
use consorcio_core::format::{format_currency, format_percent, format_timestamp};
use consorcio_core::simulation::SimulationOutput;
use consorcio_core::{AssetType, ComputationOutput};
use rust_decimal_macros::dec;

const RULE: &str = "============================================================";
const LABEL_WIDTH: usize = 28;

/// Printable comparison report, the terminal counterpart of the PDF export.
/// Results that are not a simulation or a single modality fall back to the
/// table layout.
pub fn print_report(value: &Value) {
    match render_report(value, Local::now().naive_local()) {
        Some(text) => println!("{text}"),
        None => super::table::print_table(value),
    }
}

fn render_report(value: &Value, generated_at: NaiveDateTime) -> Option<String> {
    if let Ok(out) = serde_json::from_value::<ComputationOutput<SimulationOutput>>(value.clone()) {
        let r = &out.result;
        let mut text = header(r.asset_type, generated_at);
        consortium_section(&mut text, &r.consortium);
        financing_section(&mut text, &r.financing);
        comparison_section(&mut text, &r.comparison);
        warnings_section(&mut text, &out.warnings);
        return Some(text);
    }
    if let Ok(out) = serde_json::from_value::<ComputationOutput<FinancingResult>>(value.clone()) {
        let mut text = header(out.result.asset_type, generated_at);
        financing_section(&mut text, &out.result);
        warnings_section(&mut text, &out.warnings);
        return Some(text);
    }
    if let Ok(out) = serde_json::from_value::<ComputationOutput<ConsortiumResult>>(value.clone()) {
        let mut text = header(out.result.asset_type, generated_at);
        consortium_section(&mut text, &out.result);
        warnings_section(&mut text, &out.warnings);
        return Some(text);
    }
    None
}

fn header(asset_type: AssetType, generated_at: NaiveDateTime) -> String {
    let config = get_config(asset_type);
    format!(
        "{RULE}\n {}\n Relatório gerado em {}\n{RULE}\n",
        config.labels.description,
        format_timestamp(generated_at)
    )
}

fn line(text: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(text, "  {label:.<LABEL_WIDTH$} {value}");
}

fn consortium_section(text: &mut String, c: &ConsortiumResult) {
    let labels = &get_config(c.asset_type).labels;
    text.push_str("\nCONSÓRCIO\n");
    line(text, labels.asset_value, format_currency(c.asset_value));
    line(text, "Lance", format_currency(c.bid_amount));
    line(text, "Prazo", format!("{} meses", c.term_months));
    line(text, "Taxa administrativa", format_percent(c.administrative_fee_percent));
    line(text, "Valor com taxa", format_currency(c.asset_value_with_fee));
    line(text, "Parcela mensal", format_currency(c.monthly_payment));
    line(text, "Custo total", format_currency(c.total_cost));
}

fn financing_section(text: &mut String, f: &FinancingResult) {
    let labels = &get_config(f.asset_type).labels;
    text.push_str("\nFINANCIAMENTO\n");
    line(text, labels.asset_value, format_currency(f.asset_value));
    line(text, "Entrada", format_currency(f.down_payment));
    line(text, "Valor financiado", format_currency(f.financed_amount));
    line(text, "Prazo", format!("{} meses", f.term_months));
    line(text, "Juros anuais", format_percent(f.annual_rate_percent));
    line(text, "Juros mensais", format_percent(f.monthly_rate * dec!(100)));
    line(text, "Parcela mensal", format_currency(f.monthly_payment));
    line(text, "Total de juros", format_currency(f.total_interest));
    line(text, "Custo total", format_currency(f.total_cost));
}

fn comparison_section(text: &mut String, cmp: &Comparison) {
    text.push_str("\nCOMPARAÇÃO\n");
    line(
        text,
        "Economia",
        format!(
            "{} ({})",
            format_currency(cmp.savings_amount),
            format_percent(cmp.savings_percent)
        ),
    );
    line(
        text,
        "Diferença de parcela",
        format!(
            "{} ({})",
            format_currency(cmp.payment_difference),
            format_percent(cmp.payment_difference_percent)
        ),
    );
    let winner = if cmp.consortium_is_better {
        "Consórcio"
    } else {
        "Financiamento"
    };
    line(text, "Mais vantajoso", winner);
}

fn warnings_section(text: &mut String, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    text.push_str("\nAVISOS\n");
    for w in warnings {
        let _ = writeln!(text, "  - {w}");
    }
}
