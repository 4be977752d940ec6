// demos/get_met_data.rs
use metno::{get_met_data, MetTable};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Set RUST_LOG=info (or debug) to see the request and parse steps
    env_logger::init();

    // Noon temperatures (11 UTC) at Oslo Blindern and Trondheim Voll
    let table = get_met_data()
        .series_type_id("2")
        .stations("18700,68860")
        .elements("TA")
        .from_date("2015-06-10")
        .to_date("2015-06-15")
        .hours("11")
        .timezone(chrono_tz::Europe::Oslo)
        .call();

    let table = match table {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e.into());
        }
    };

    if let MetTable::Wide(wide) = &table {
        println!("Columns: {:?}", wide.column_names());
    }
    let df = table.to_dataframe()?;
    println!("Shape: {:?}", df.shape());
    println!("{}", df);

    Ok(())
}
