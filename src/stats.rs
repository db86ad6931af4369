use crate::sweep::CountyData;
use serde::{Deserialize, Serialize};

/// Summary statistics over a set of values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Summary for one county.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountySummary {
    pub county_id: String,
    pub summary: Summary,
}

/// Min, max, mean and median. `None` when there is nothing finite to summarize.
pub fn summary(values: impl IntoIterator<Item = f64>) -> Option<Summary> {
    let mut vals: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };
    Some(Summary {
        count,
        min: vals[0],
        max: vals[count - 1],
        mean,
        median,
    })
}

/// Summary over every observation of every county.
pub fn overall_summary(data: &CountyData) -> Option<Summary> {
    summary(data.values().flatten().map(|o| o.value))
}

/// One summary per county, ordered by county id. Counties without values are skipped.
pub fn grouped_summary(data: &CountyData) -> Vec<CountySummary> {
    data.iter()
        .filter_map(|(county, obs)| {
            summary(obs.iter().map(|o| o.value)).map(|summary| CountySummary {
                county_id: county.clone(),
                summary,
            })
        })
        .collect()
}
