//! `CsvObserver` — records every task-lifecycle event to `task_events.csv`
//! for offline analysis, grounded on the teacher's `dt-output::CsvWriter`
//! (one `csv::Writer<File>`, buffer the first write error rather than
//! unwinding from inside an observer callback).

use std::fs::File;
use std::path::Path;

use csv::Writer;

use rt_core::{TaskId, VirtualTime};

use crate::error::OutputResult;
use crate::observer::RunObserver;
use crate::OutputError;

/// Writes one row per task-lifecycle event to `task_events.csv` in the
/// configured output directory.
pub struct CsvObserver {
    writer: Writer<File>,
    last_error: Option<OutputError>,
    finished: bool,
}

impl CsvObserver {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(dir.join("task_events.csv"))?;
        writer.write_record(["event", "round", "virtual_time", "task_id", "case_id", "task_type", "ra"])?;
        Ok(CsvObserver { writer, last_error: None, finished: false })
    }

    /// Take the stored write error (if any) after the run ends. Returns
    /// `None` if every write succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn record(&mut self, row: [&str; 7]) {
        let result = self.writer.write_record(row).map_err(OutputError::from);
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

impl RunObserver for CsvObserver {
    fn on_task_given(&mut self, task_id: &TaskId, case_id: &str, task_type: &str, ra: &str) {
        self.record(["given", "", "", task_id.0.as_str(), case_id, task_type, ra]);
    }

    fn on_task_started(&mut self, task_id: &TaskId, case_id: &str, task_type: &str, ra: &str) {
        self.record(["started", "", "", task_id.0.as_str(), case_id, task_type, ra]);
    }

    fn on_task_complete(&mut self, task_id: &TaskId, case_id: &str, task_type: &str) {
        self.record(["complete", "", "", task_id.0.as_str(), case_id, task_type, ""]);
    }

    fn on_eviction(&mut self, agent: &str, round: u64) {
        let round = round.to_string();
        self.record(["eviction", &round, "", "", "", "", agent]);
    }

    fn on_run_end(&mut self, final_round: u64, final_time: VirtualTime) {
        let round = final_round.to_string();
        let time = final_time.to_string();
        self.record(["run_end", &round, &time, "", "", "", ""]);
        let _ = self.finish();
    }
}
