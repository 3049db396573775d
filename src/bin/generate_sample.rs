//! Writes the demo dataset `data/techflow.csv`: fictional B2B SaaS
//! customers with revenue, seat counts, and churn flags. The rows are fixed
//! here, so regenerating the file reproduces the committed fixture byte for
//! byte and the demo binary always runs against the same numbers.

const HEADER: [&str; 7] = [
    "CustomerID",
    "CompanyName",
    "Industry",
    "MonthlyRevenue",
    "SeatCount",
    "ContractYears",
    "Cancelled",
];

/// One entry per customer; an empty MonthlyRevenue field loads as null.
const CUSTOMERS: &[[&str; 7]] = &[
    ["0", "Acme Labs", "SaaS", "4200", "84", "2.0", "0"],
    ["1", "Globex Systems", "Fintech", "0", "12", "0.5", "1"],
    ["2", "Initech Works", "SaaS", "10350", "115", "3.0", "0"],
    ["3", "Umbra Dynamics", "Healthcare", "2760", "46", "1.5", "0"],
    ["4", "Vertex Digital", "Retail", "", "30", "1.0", "0"],
    ["5", "Nimbus Labs", "Logistics", "8900", "178", "4.5", "0"],
    ["6", "Quanta Systems", "Fintech", "1260", "21", "0.5", "1"],
    ["7", "Helix Works", "SaaS", "5610", "102", "2.5", "0"],
    ["8", "Borealis Digital", "Healthcare", "3150", "63", "2.0", "0"],
    ["9", "Cobalt Dynamics", "Retail", "940", "47", "1.0", "1"],
    ["10", "Meridian Labs", "SaaS", "7440", "124", "3.5", "0"],
    ["11", "Solstice Systems", "Logistics", "2380", "34", "1.5", "0"],
    ["12", "Acme Dynamics", "Fintech", "6120", "68", "3.0", "0"],
    ["13", "Globex Works", "SaaS", "1980", "33", "1.0", "0"],
    ["14", "Initech Digital", "Healthcare", "", "55", "2.0", "1"],
    ["15", "Umbra Labs", "Retail", "4650", "93", "2.5", "0"],
    ["16", "Vertex Systems", "SaaS", "12800", "160", "5.0", "0"],
    ["17", "Nimbus Works", "Fintech", "2210", "17", "0.5", "1"],
    ["18", "Quanta Digital", "Logistics", "3870", "43", "2.0", "0"],
    ["19", "Helix Labs", "SaaS", "5290", "138", "3.0", "0"],
];

fn write_dataset<W: std::io::Write>(out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;
    for row in CUSTOMERS {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all("data")?;
    let output_path = "data/techflow.csv";
    write_dataset(std::fs::File::create(output_path)?)?;
    println!("Wrote {} customers to {output_path}", CUSTOMERS.len());
    Ok(())
}
