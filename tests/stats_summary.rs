use bls_series::models::CleanObservation;
use bls_series::stats::{grouped_summary, overall_summary, summary};
use bls_series::sweep::CountyData;

fn obs(month: u32, value: f64) -> CleanObservation {
    CleanObservation {
        year: 2013,
        month,
        period_name: "Dummy".into(),
        value,
    }
}

#[test]
fn median_even_and_odd() {
    let even = summary([4.0, 1.0, 3.0, 2.0]).unwrap();
    assert_eq!(even.count, 4);
    assert_eq!(even.min, 1.0);
    assert_eq!(even.max, 4.0);
    assert!((even.mean - 2.5).abs() < 1e-9);
    assert!((even.median - 2.5).abs() < 1e-9);

    let odd = summary([10.0, 30.0, 20.0]).unwrap();
    assert_eq!(odd.median, 20.0);
    assert_eq!(odd.mean, 20.0);
}

#[test]
fn empty_or_non_finite_has_no_summary() {
    assert!(summary(Vec::<f64>::new()).is_none());
    assert!(summary([f64::NAN]).is_none());
    assert_eq!(summary([f64::NAN, 5.0]).unwrap().count, 1);
}

#[test]
fn overall_and_grouped_over_counties() {
    let mut data = CountyData::new();
    data.insert("45001".into(), vec![obs(1, 10.0), obs(2, 12.0)]);
    data.insert("37119".into(), vec![obs(1, 2.0), obs(2, 4.0), obs(3, 6.0)]);
    data.insert("37001".into(), vec![]);

    let all = overall_summary(&data).unwrap();
    assert_eq!(all.count, 5);
    assert_eq!(all.min, 2.0);
    assert_eq!(all.max, 12.0);
    assert_eq!(all.median, 6.0);
    assert!((all.mean - 6.8).abs() < 1e-9);

    let groups = grouped_summary(&data);
    let ids: Vec<&str> = groups.iter().map(|g| g.county_id.as_str()).collect();
    assert_eq!(ids, vec!["37119", "45001"]);
    assert_eq!(groups[0].summary.median, 4.0);
    assert_eq!(groups[1].summary.mean, 11.0);
}
