use crate::sweep::CountyData;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Save cleaned county series as one flat CSV table with header.
pub fn save_csv<P: AsRef<Path>>(data: &CountyData, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("county_id", "year", "month", "period_name", "value"))?;
    for (county, observations) in data {
        for o in observations {
            wtr.serialize((county, o.year, o.month, &o.period_name, o.value))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save cleaned county series as a JSON object keyed by county id.
pub fn save_json<P: AsRef<Path>>(data: &CountyData, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string(data)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Load a file written by `save_json`.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<CountyData> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let data = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CleanObservation;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let mut data = CountyData::new();
        data.insert(
            "37119".into(),
            vec![CleanObservation {
                year: 2013,
                month: 12,
                period_name: "December".into(),
                value: 6.0,
            }],
        );
        save_csv(&data, &csvp).unwrap();
        save_json(&data, &jsonp).unwrap();
        assert!(csvp.exists());
        assert_eq!(load_json(&jsonp).unwrap(), data);
    }
}
