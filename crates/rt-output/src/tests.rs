use rt_core::{TaskId, VirtualTime};

use crate::{CsvObserver, RunObserver};

#[test]
fn csv_observer_writes_task_events() {
    let dir = tempfile::tempdir().unwrap();
    let mut obs = CsvObserver::new(dir.path()).unwrap();

    obs.on_task_given(&TaskId("task_0".to_string()), "case_1", "pack", "packer_ra_1");
    obs.on_task_started(&TaskId("task_0".to_string()), "case_1", "pack", "packer_ra_1");
    obs.on_task_complete(&TaskId("task_0".to_string()), "case_1", "pack");
    obs.on_run_end(3, VirtualTime::days(6.0));

    assert!(obs.take_error().is_none());

    let contents = std::fs::read_to_string(dir.path().join("task_events.csv")).unwrap();
    assert!(contents.contains("given"));
    assert!(contents.contains("started"));
    assert!(contents.contains("complete"));
    assert!(contents.contains("run_end"));
}
