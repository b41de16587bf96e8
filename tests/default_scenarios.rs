use fuzzy_regulator::{defaults, InferenceConfig, ScanMode};

#[test]
fn indexed_scan_outputs() {
    let system = defaults::system(InferenceConfig::default()).unwrap();

    let outputs = system.infer(19.);
    assert_eq!(outputs.output(), 16.75);
    assert_eq!(outputs.membership(), 0.75);
    assert_eq!(outputs.scanned(), 2601);

    let outputs = system.infer(23.);
    assert_eq!(outputs.output(), 8.);
    assert_eq!(outputs.membership(), 1.);
    assert_eq!(outputs.scanned(), 801);

    let outputs = system.infer(10.);
    assert_eq!(outputs.output(), 18.);
    assert_eq!(outputs.membership(), 1.);
    assert_eq!(outputs.scanned(), 1801);
}

#[test]
fn accumulated_scan_matches_step_drift() {
    let system = defaults::system(InferenceConfig::default().with_scan(ScanMode::Accumulated)).unwrap();

    let outputs = system.infer(19.);
    assert_eq!(outputs.output(), 16.75999999999982);
    assert_eq!(outputs.rounded(2), 16.76);

    let outputs = system.infer(23.);
    assert_eq!(outputs.output(), 8.009999999999874);
    assert_eq!(outputs.rounded(2), 8.01);

    let outputs = system.infer(10.);
    assert_eq!(outputs.output(), 18.000000000000014);
    assert_eq!(outputs.rounded(2), 18.);
}

#[test]
fn scan_modes_agree_within_one_step() {
    let indexed = defaults::system(InferenceConfig::default()).unwrap();
    let accumulated = defaults::system(InferenceConfig::default().with_scan(ScanMode::Accumulated)).unwrap();

    for temperature in [-10., 0., 10., 18., 19., 20.5, 21., 22., 23., 24.5, 25., 26., 40., 60.] {
        let a = indexed.calculate_output(temperature);
        let b = accumulated.calculate_output(temperature);

        assert!((a - b).abs() <= 0.01 + 1e-9, "{temperature}: indexed {a}, accumulated {b}");
    }
}

#[test]
fn blended_temperatures() {
    let system = defaults::system(InferenceConfig::default()).unwrap();

    // cold 0.25, comfortable 0.75: medium clipped at 0.75 wins
    assert_eq!(system.calculate_output(21.), 7.25);

    // comfortable 0.5, hot 0.5: low is already 0.5 at the bottom of the domain
    let outputs = system.infer(25.);
    assert_eq!(outputs.output(), 0.);
    assert_eq!(outputs.membership(), 0.5);

    // hot 1.0: low is fully true from 0
    let outputs = system.infer(50.);
    assert_eq!(outputs.output(), 0.);
    assert_eq!(outputs.scanned(), 1);
}

#[test]
fn temperature_memberships() {
    let system = defaults::system(InferenceConfig::default()).unwrap();
    let memberships = system.temperature_memberships(19.);

    assert_eq!(memberships["cold"], 0.75);
    assert_eq!(memberships["comfortable"], 0.25);
    assert_eq!(memberships["hot"], 0.);
}

#[test]
fn coarser_step() {
    let system = defaults::system(InferenceConfig::default().with_step(0.5)).unwrap();

    assert_eq!(system.calculate_output(19.), 17.);
    assert_eq!(system.calculate_output(10.), 18.);
}
