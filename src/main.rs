use anyhow::{Context, Result};
use std::path::Path;

use miniframe::{load_file, AggOp, Frame, Value};

/// The one dataset this demo reads; regenerate it with the
/// `generate_sample` binary.
const DATASET: &str = "data/techflow.csv";

fn main() -> Result<()> {
    env_logger::init();

    let frame = load_file(Path::new(DATASET))
        .with_context(|| format!("loading {DATASET}"))?;

    section("The dataset");
    let (rows, cols) = frame.shape();
    println!("shape: {rows} rows x {cols} columns");
    for (name, dtype) in frame.dtypes() {
        println!("  {name}: {dtype}");
    }

    section("First five rows");
    print_frame(&frame.slice_rows(0, 5));

    section("One column as a series");
    let revenue = frame.column("MonthlyRevenue")?;
    println!("describe({}):", revenue.name());
    for (stat, value) in revenue.describe() {
        println!("  {stat:>6}: {value}");
    }

    section("Unique values and frequencies");
    let industry = frame.column("Industry")?;
    println!("{} unique industries:", industry.nunique());
    for (value, count) in industry.value_counts() {
        println!("  {value}: {count}");
    }

    section("Aggregation");
    println!("total revenue:   {}", revenue.aggregate(AggOp::Sum)?);
    println!("average revenue: {}", revenue.aggregate(AggOp::Mean)?);
    println!(
        "average seats:   {}",
        frame.column("SeatCount")?.aggregate(AggOp::Mean)?
    );

    section("Boolean masks and filtering");
    let is_cancelled = frame.column("Cancelled")?.eq(&Value::Integer(1));
    let churned = frame.filter(&is_cancelled)?;
    let churn_rate = churned.row_count() as f64 / frame.row_count() as f64 * 100.0;
    println!(
        "cancelled: {} of {} customers ({churn_rate:.1}%)",
        churned.row_count(),
        frame.row_count()
    );
    print_frame(&churned.select_columns(&["CompanyName", "Industry", "MonthlyRevenue"])?);

    section("Row and cell access");
    println!("first customer:  {}", frame.cell(0, "CompanyName")?);
    println!("last customer:   {}", frame.cell(-1, "CompanyName")?);
    if let Some(&label) = churned.labels().first() {
        println!(
            "first churned row keeps its original label {label}: {}",
            churned.cell_by_label(label, "CompanyName")?
        );
    }

    Ok(())
}

fn section(title: &str) {
    println!("\n{}", "-".repeat(60));
    println!("{title}");
    println!("{}", "-".repeat(60));
}

/// Plain fixed-width dump of a frame, labels in the first column.
fn print_frame(frame: &Frame) {
    print!("{:>6}", "");
    for name in frame.column_names() {
        print!("  {name:>16}");
    }
    println!();
    for (row, &label) in frame.labels().iter().enumerate() {
        print!("{label:>6}");
        for col in frame.columns() {
            print!("  {:>16}", col.values()[row].to_string());
        }
        println!();
    }
}
