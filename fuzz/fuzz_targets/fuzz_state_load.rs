#![no_main]

use hearth_state::{load, load_with_report, save, SchemaVersion};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let report = load_with_report(data);
    assert_eq!(report.state.version, SchemaVersion::CURRENT);

    // Whatever loads must survive a save/load cycle unchanged.
    let bytes = save(&report.state);
    assert_eq!(load(&bytes), report.state);
});
